use std::error::Error;

use clap::Parser;
use futures::StreamExt; // for .next()
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cmus_remote::{commands::Command, Client, ConnectionTarget, Event, Remote, DEFAULT_PORT};

/// Control a cmus instance started with `--listen`.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Host cmus is listening on
    #[arg(long, env = "CMUS_HOST", default_value = "localhost")]
    host: String,

    /// Port cmus is listening on
    #[arg(long, env = "CMUS_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Value of the `server_password` option in cmus
    #[arg(long, env = "CMUS_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Command to send, by label or wire string (e.g. "Next" or "player-next").
    /// Watches the player status if omitted.
    command: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let target = ConnectionTarget::from_settings(&args.host, &args.port.to_string(), &args.password)?;
    let client = Client::new();

    if let Some(name) = args.command {
        let command = Command::lookup(&name)?;
        let response = client.execute(&target, command).await?;

        if !response.is_empty() {
            println!("{}", response);
        }

        return Ok(());
    }

    let (mut remote, mut events) = Remote::new(client, target);
    remote.activate();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.next() => match event {
                Some(Event::Status(status)) => println!(
                    "[{}] {} - {} {} ({}%)",
                    status.state.as_deref().unwrap_or("?"),
                    status.artist().unwrap_or("(none)"),
                    status.title().unwrap_or("(none)"),
                    status.run_time(),
                    status.progress(),
                ),
                Some(Event::Message { command, text }) => println!("{}: {}", command, text),
                Some(Event::Error { command, error }) => eprintln!("{} failed: {}", command, error),
                Some(_) => {}
                None => break,
            },
        }
    }

    remote.deactivate().await;
    Ok(())
}
