use std::io::{BufRead, Write};

use clap::Args;
use intervals_core::{Config, Counter};

use crate::prompt::is_quit;

#[derive(Args, Debug)]
pub struct CounterArgs {
    /// Name to greet (defaults to config `counter.name`)
    #[arg(long)]
    pub name: Option<String>,
}

/// Press enter to click; `q` to quit.
pub fn drive<R: BufRead, W: Write>(
    counter: &mut Counter,
    input: R,
    out: &mut W,
) -> std::io::Result<()> {
    let mut lines = input.lines();
    loop {
        if counter.take_redraw() {
            writeln!(out, "{}", counter.render())?;
            out.flush()?;
        }
        match lines.next() {
            Some(line) => {
                if is_quit(&line?) {
                    return Ok(());
                }
                counter.increment();
            }
            None => return Ok(()),
        }
    }
}

pub fn run(args: CounterArgs) -> Result<(), Box<dyn std::error::Error>> {
    let name = match args.name {
        Some(name) => name,
        None => Config::load_or_default().counter.name,
    };
    let mut counter = Counter::new(name);
    drive(&mut counter, std::io::stdin().lock(), &mut std::io::stdout())?;
    Ok(())
}
