pub mod commands;

use std::io::{self, BufRead, Write};

use crate::chat::{quick_reply, ConversationLog, Dispatcher, QuickReply, Utterance, QUICK_REPLIES};

/// A line typed at the terminal prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplInput {
    QuickReply(&'static QuickReply),
    Text(String),
    Reset,
    Exit,
    Unknown(String),
    Empty,
}

pub fn parse_line(line: &str) -> ReplInput {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ReplInput::Empty;
    }

    match trimmed {
        "/exit" | "/quit" => return ReplInput::Exit,
        "/reset" => return ReplInput::Reset,
        _ => {}
    }

    // Only `/<number>` is a control; any other text is sent as typed.
    if let Some(position) = trimmed.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
        return quick_reply::by_position(position)
            .map(ReplInput::QuickReply)
            .unwrap_or_else(|| ReplInput::Unknown(trimmed.to_string()));
    }

    ReplInput::Text(line.trim_end_matches(['\r', '\n']).to_string())
}

/// The whole log as plain text, one `[ROLE]: content` block per entry.
pub fn render_transcript(log: &ConversationLog) -> String {
    let mut transcript = String::new();
    for entry in log.entries() {
        transcript.push_str(&format!("[{}]: {}\n", entry.role().as_str().to_uppercase(), entry.content()));
        transcript.push_str("---\n");
    }
    transcript
}

fn print_controls() {
    println!("--- Amber Salon Terminal Chat ---");
    for (i, reply) in QUICK_REPLIES.iter().enumerate() {
        println!("  /{}  {}", i + 1, reply.label);
    }
    println!("Type /reset to start over, /exit to quit. Anything else is sent as a question.");
    println!("---------------------------------");
}

pub async fn run_repl(dispatcher: &Dispatcher) -> io::Result<()> {
    print_controls();

    let stdin = io::stdin();
    let mut log = ConversationLog::new();

    loop {
        print!("\nYou> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let utterance = match parse_line(&input) {
            ReplInput::Empty => continue,
            ReplInput::Exit => break,
            ReplInput::Reset => {
                log = ConversationLog::new();
                println!("Conversation cleared.");
                continue;
            }
            ReplInput::Unknown(command) => {
                println!("No quick reply {}, pick /1 to /{}", command, QUICK_REPLIES.len());
                continue;
            }
            ReplInput::QuickReply(reply) => Utterance::QuickReply(reply),
            ReplInput::Text(text) => Utterance::FreeText(text),
        };

        if let Some(outcome) = dispatcher.dispatch(&mut log, utterance).await {
            println!();
            print!("{}", render_transcript(&log));
            if let Some(diagnostic) = outcome.diagnostic {
                eprintln!("{}", diagnostic);
            }
        }
    }

    Ok(())
}
