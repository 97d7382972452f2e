#![allow(dead_code)]

use std::time::Duration;

use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
    sync::mpsc,
    time,
};

use cmus_remote::ConnectionTarget;

/// Accepts connections like cmus does, replying with `reply` to whatever command follows a
/// correct password. Publishes every line received on a connection once the client closed it.
pub async fn fake_cmus(
    password: &'static str,
    reply: fn(&str) -> &'static str,
) -> (ConnectionTarget, mpsc::UnboundedReceiver<Vec<String>>) {
    slow_fake_cmus(password, reply, Duration::ZERO).await
}

/// Like [`fake_cmus`], but waits for `delay` before answering the login.
pub async fn slow_fake_cmus(
    password: &'static str,
    reply: fn(&str) -> &'static str,
    delay: Duration,
) -> (ConnectionTarget, mpsc::UnboundedReceiver<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let (stream, _) = listener.accept().await.unwrap();
            let tx = tx.clone();

            tokio::spawn(async move {
                let (read, mut write) = stream.into_split();
                let mut lines = BufReader::new(read).lines();
                let mut received = Vec::new();

                if let Some(login) = lines.next_line().await.unwrap() {
                    let accepted = login == format!("passwd {}", password);
                    received.push(login);
                    time::sleep(delay).await;

                    if accepted {
                        write.write_all(b"\n").await.unwrap();

                        if let Some(command) = lines.next_line().await.unwrap() {
                            write.write_all(reply(&command).as_bytes()).await.unwrap();
                            received.push(command);
                        }
                    } else {
                        write.write_all(b"wrong password\n\n").await.unwrap();
                    }
                }

                while let Some(line) = lines.next_line().await.unwrap() {
                    received.push(line);
                }

                let _ = tx.send(received);
            });
        }
    });

    (ConnectionTarget::new("127.0.0.1", port, password), rx)
}

pub fn status_reply(command: &str) -> &'static str {
    match command {
        "status" => {
            "status playing\nduration 180\nposition 90\ntag artist X\ntag title Y\nset repeat true\n\n"
        }
        _ => "\n",
    }
}

/// A target nothing is listening on.
pub async fn unreachable_target() -> ConnectionTarget {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    ConnectionTarget::new("127.0.0.1", port, "")
}
