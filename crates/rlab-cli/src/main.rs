use rlab_cli::{cli, logging, session};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    let matches = cli::command().get_matches();
    logging::init(cli::log_format(&matches))?;

    let mut board = cli::build_board(&matches)?;
    let mut stdout = io::stdout().lock();

    match matches.subcommand() {
        Some(("show", args)) => {
            stdout.write_all(cli::show(&mut board, args)?.as_bytes())?;
        }
        Some(("columns", args)) => {
            stdout.write_all(cli::columns(&board, args)?.as_bytes())?;
        }
        Some(("session", _)) => {
            session::run(&mut board, io::stdin().lock(), &mut stdout)?;
        }
        _ => anyhow::bail!("a subcommand is required"),
    }
    stdout.flush()?;
    Ok(())
}
