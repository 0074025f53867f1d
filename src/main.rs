use clap::Parser;
use hexabyte::action::{ActionHandler, Transition};
use hexabyte::config::RcLoader;
use hexabyte::document_model::ByteDocument;
use hexabyte::editor::Editor;
use std::cell::RefCell;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::rc::Rc;

/// Navigate and search a binary file with editor commands.
#[derive(Debug, Parser)]
#[command(name = "hexabyte", version, about)]
struct Args {
    /// File to open
    #[arg(required_unless_present = "sample_rc")]
    file: Option<PathBuf>,

    /// Command to run, e.g. "goto byte 0x10"; may be repeated.
    /// Commands are read from stdin when none are given.
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    commands: Vec<String>,

    /// Configuration file to use instead of .hexabyterc
    #[arg(long, value_name = "PATH")]
    rc: Option<PathBuf>,

    /// Print a sample .hexabyterc and exit
    #[arg(long)]
    sample_rc: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    if args.sample_rc {
        print!("{}", RcLoader::generate_sample_rc());
        return Ok(());
    }
    let file = args.file.ok_or("missing FILE argument")?;

    // Load RC configuration
    let config = match &args.rc {
        Some(path) => RcLoader::load_from(path),
        None => RcLoader::load_config(),
    };

    let document = ByteDocument::open(&file)?;
    let editor = Rc::new(RefCell::new(Editor::new(document)));
    let mut handler = ActionHandler::with_config(editor.clone(), &config);

    if args.commands.is_empty() {
        let mut stdin = io::stdin().lock();
        let mut buf = Vec::new();
        while let Some(line) = read_command(&mut stdin, &mut buf)? {
            if run_line(&mut handler, &editor, &line) == Transition::Quit {
                break;
            }
        }
    } else {
        for command in &args.commands {
            if run_line(&mut handler, &editor, command) == Transition::Quit {
                break;
            }
        }
    }

    Ok(())
}

/// Next input line without its line ending. Invalid UTF-8 is replaced
/// rather than ending the session; `None` at end of input.
fn read_command(reader: &mut impl BufRead, buf: &mut Vec<u8>) -> io::Result<Option<String>> {
    buf.clear();
    if reader.read_until(b'\n', buf)? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn run_line(handler: &mut ActionHandler, editor: &Rc<RefCell<Editor>>, line: &str) -> Transition {
    match handler.execute_line(line) {
        Ok(Transition::Stay) => {
            if !line.trim().is_empty() {
                println!("{}", editor.borrow().status_line());
            }
            Transition::Stay
        }
        Ok(Transition::Quit) => Transition::Quit,
        Err(err) => {
            eprintln!("error: {err}");
            Transition::Stay
        }
    }
}
