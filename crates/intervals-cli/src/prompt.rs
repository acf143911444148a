//! Line-based terminal input shared by the form and the running timer.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

pub fn is_quit(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "q" | "quit")
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `question` and read one line. `None` on end of input.
    pub async fn ask(&mut self, question: &str) -> std::io::Result<Option<String>> {
        print!("{question}");
        std::io::stdout().flush()?;
        self.lines.next_line().await
    }

    /// Resolve when the user asks to quit. Never resolves after end of input.
    pub async fn quit_requested(&mut self) {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) if is_quit(&line) => return,
                Ok(Some(_)) => continue,
                Ok(None) | Err(_) => std::future::pending::<()>().await,
            }
        }
    }
}

/// Resolve on Ctrl-C or a `q` line.
pub async fn cancel_signal(prompt: &mut Prompt) {
    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::warn!(error = %e, "ctrl-c handler unavailable");
                std::future::pending::<()>().await;
            }
        }
        _ = prompt.quit_requested() => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_words() {
        assert!(is_quit("q"));
        assert!(is_quit(" Quit \n"));
        assert!(!is_quit(""));
        assert!(!is_quit("qq"));
    }
}
