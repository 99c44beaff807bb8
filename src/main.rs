use std::fs;

use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tea::{Session, init_tracing, interpreter::value::core::Value};

/// tea is a small, statically declared but dynamically checked scripting
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells tea to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Logs every consumed token and the generated syntax trees. Requires
    /// `RUST_LOG` to be set.
    #[arg(short, long)]
    trace: bool,

    /// The script, or its path with `--file`. Starts a REPL if omitted.
    contents: Option<String>,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let mut session = Session::new();
    session.set_trace(args.trace);

    let Some(contents) = args.contents else {
        repl(&mut session, args.trace);
        return;
    };

    let script = if args.file {
        fs::read_to_string(&contents).unwrap_or_else(|_| {
                                         eprintln!("Failed to read the input file '{contents}'. Perhaps this file does not exist?");
                                         std::process::exit(1);
                                     })
    } else {
        contents
    };

    if let Err(e) = session.interpret(&script) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Reads programs line by line until `\exit` or end of input.
fn repl(session: &mut Session, mut trace: bool) {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to start the REPL: {e}");
            std::process::exit(1);
        },
    };

    while !session.exited() {
        let line = match editor.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("!! {e}");
                break;
            },
        };
        let _ = editor.add_history_entry(line.as_str());

        match line.trim() {
            "" => {},
            "\\exit" => session.exit(),
            "\\debug" => {
                trace = !trace;
                session.set_trace(trace);
                println!("<- tracing {}", if trace { "on" } else { "off" });
            },
            source => match session.interpret(source) {
                Ok(value) if value != Value::null() => println!("<- {value}"),
                Ok(_) => {},
                Err(e) => println!("!! {e}"),
            },
        }
    }
}
