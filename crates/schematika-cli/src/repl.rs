//! Interactive line-at-a-time REPL (§6). Each accumulated `def name = ...;`
//! chunk is lexed on its own via [`Parser::resume`], which carries the
//! running global symbol table forward so later input can reference
//! earlier definitions without re-declaring the primitive table.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use schematika_gc::Heap;
use schematika_interp::Interpreter;
use schematika_parse::Parser;
use schematika_util::Handler;

pub fn run(interp: &Interpreter, heap: &Heap, gc_stats: bool) -> Result<()> {
    println!("schematika REPL — enter one `def name = expr;`, Ctrl-D to quit.");

    // An empty-source parse just runs `Parser::new`'s primitive bootstrap,
    // handing back a globals table that already matches `interp`'s.
    let mut bootstrap_handler = Handler::new();
    let bootstrap = Parser::new("", &mut bootstrap_handler);
    let (mut globals, mut global_types) = bootstrap.into_globals();

    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut depth: i32 = 0;

    loop {
        print!("{}", if buffer.is_empty() { "schematika> " } else { "......... > " });
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        depth += brace_delta(&line);
        buffer.push_str(&line);

        // Wait for a balanced, semicolon-terminated chunk before parsing —
        // a `def`'s body may itself contain `{ ... }` or `(...)`.
        if depth > 0 || !buffer.trim_end().ends_with(';') {
            continue;
        }

        let mut handler = Handler::new();
        let mut parser = Parser::resume(&buffer, &mut handler, globals, global_types);
        let parsed = parser.parse_one_def();
        (globals, global_types) = parser.into_globals();
        buffer.clear();
        depth = 0;

        match parsed {
            Ok(Some(expr)) => {
                let name = expr.as_define().expect("parse_one_def only returns Define nodes").name;
                match interp.eval(&expr, None) {
                    Ok(_) => {
                        let slot = interp.globals().len() as u32 - 1;
                        println!("{name} = {:?}", interp.globals().get(slot));
                        if gc_stats {
                            eprintln!("{}", heap.stats());
                        }
                    }
                    Err(e) => eprintln!("runtime error: {e}"),
                }
            }
            Ok(None) => {}
            Err(e) => eprintln!("parse error: {e}"),
        }
    }

    Ok(())
}

/// Naive `{`/`(` nesting tracker; doesn't account for braces inside string
/// literals, which Schematika's grammar has no use for at top level anyway.
fn brace_delta(line: &str) -> i32 {
    let mut delta = 0;
    for ch in line.chars() {
        match ch {
            '{' | '(' => delta += 1,
            '}' | ')' => delta -= 1,
            _ => {}
        }
    }
    delta
}
