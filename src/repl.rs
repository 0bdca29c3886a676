//! Interactive REPL
//!
//! One interpreter lives for the whole session, so global bindings persist
//! across lines. Every line is an independent run with its own diagnostics;
//! errors of either class are reported and the loop continues.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::diagnostics::SourceFile;
use crate::interp::Interpreter;

/// Run the read-eval-print loop until Ctrl-D or Ctrl-C.
pub fn repl() -> miette::Result<()> {
    println!("Loxide REPL v{}", crate::VERSION);
    println!("Press Ctrl-D to exit");
    println!();

    let mut editor = DefaultEditor::new()
        .map_err(|e| miette::miette!("Failed to start line editor: {}", e))?;
    let mut interpreter = Interpreter::new();

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(trimmed);

                let file = SourceFile::new("<repl>", trimmed);
                if let Err(err) = crate::run(&file, &mut interpreter) {
                    err.emit_all();
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(miette::miette!("Failed to read line: {}", e)),
        }
    }

    println!("Goodbye!");
    Ok(())
}
