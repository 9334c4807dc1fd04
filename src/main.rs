use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rowstore::{Error, MetaCommand, OverflowPolicy, Statement, Table};
use tracing_subscriber::EnvFilter;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Overflow {
    Reject,
    Truncate,
}

impl From<Overflow> for OverflowPolicy {
    fn from(overflow: Overflow) -> Self {
        match overflow {
            Overflow::Reject => OverflowPolicy::Reject,
            Overflow::Truncate => OverflowPolicy::Truncate,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "In-memory paged row store")]
struct Cli {
    /// What to do with usernames or emails longer than their column
    #[arg(long, value_enum, default_value_t = Overflow::Reject)]
    overflow: Overflow,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

struct InputBuffer {
    buffer: String,
}

impl InputBuffer {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Returns `Ok(false)` at end of input.
    fn read_input(&mut self) -> io::Result<bool> {
        self.buffer.clear();
        if io::stdin().read_line(&mut self.buffer)? == 0 {
            return Ok(false);
        }
        self.buffer = self.buffer.trim().to_string();
        Ok(true)
    }
}

fn print_prompt() -> io::Result<()> {
    print!("db > ");
    io::stdout().flush()
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run_statement(input: &str, table: &mut Table) {
    let statement = match Statement::prepare(input, table.policy()) {
        Ok(statement) => statement,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    match statement.execute(table) {
        Ok(rows) => {
            for row in rows {
                println!("{row}");
            }
            println!("Executed.");
        }
        Err(Error::TableFull { .. }) => println!("Error: Table full."),
        Err(err) => println!("Error: {err}."),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let mut table = Table::with_policy(cli.overflow.into());
    let mut input_buffer = InputBuffer::new();

    loop {
        if let Err(err) = print_prompt() {
            eprintln!("Error writing prompt: {err}");
            return ExitCode::FAILURE;
        }
        match input_buffer.read_input() {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("Error reading input");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("Error reading input: {err}");
                return ExitCode::FAILURE;
            }
        }

        match MetaCommand::parse(&input_buffer.buffer) {
            Some(MetaCommand::Exit) => break,
            Some(MetaCommand::Unrecognized) => {
                println!("Unrecognized meta-command: {}", input_buffer.buffer);
            }
            None => run_statement(&input_buffer.buffer, &mut table),
        }
    }

    ExitCode::SUCCESS
}
