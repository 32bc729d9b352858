// rbflow: line-at-a-time recognizer for a Ruby-flavoured control-flow language

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use rbflow::report::Report;
use rbflow::ui::App;

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [file | -]", program_name);
    eprintln!();
    eprintln!("  {}              # Interactive prompt", program_name);
    eprintln!("  {} lines.rb     # Check every non-blank line of a file", program_name);
    eprintln!("  {} -            # Check every non-blank line of stdin", program_name);
}

/// Check each non-blank line independently and print the results.
///
/// Returns whether every line was accepted without lex errors.
fn check_lines<I>(lines: I) -> io::Result<bool>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut all_clean = true;
    let mut checked = 0;

    for (index, line) in lines.into_iter().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let report = Report::check(&line);
        checked += 1;
        all_clean &= report.is_clean();

        println!("{}: {}", index + 1, line);
        for diagnostic in report.diagnostics() {
            println!("    {}", diagnostic);
        }
        println!("    {}", report.verdict());
    }

    eprintln!("Checked {} line(s).", checked);
    Ok(all_clean)
}

fn run_batch(target: &str) -> Result<bool, Box<dyn std::error::Error>> {
    if target == "-" {
        let stdin = io::stdin();
        return Ok(check_lines(stdin.lock().lines())?);
    }

    let source = fs::read_to_string(target)?;
    Ok(check_lines(source.lines().map(|l| Ok::<_, io::Error>(l.to_string())))?)
}

fn run_interactive() -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    eprintln!("Checked {} line(s).", app.reports.len());
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("rbflow");

    match args.get(1).map(|s| s.as_str()) {
        None => run_interactive(),
        Some("-h") | Some("--help") => {
            print_usage(program_name);
            Ok(())
        }
        Some(target) => {
            if target != "-" && !Path::new(target).exists() {
                eprintln!("Error: File '{}' not found", target);
                print_usage(program_name);
                std::process::exit(1);
            }

            if !run_batch(target)? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
