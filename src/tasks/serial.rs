// ShotLog - Serial Console Task
//
// Reads the console byte by byte, turns complete lines into commands and
// forwards them to the control loop. Never touches the log file itself.

use std::io::{self, Read};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::command::{parse_command, LineEvent, LineReader};
use crate::config::*;
use crate::events::Command;

pub fn serial_task(command_tx: Sender<Command>) {
    log::info!("Serial task started");

    let mut reader = LineReader::new();
    let mut stdin = io::stdin().lock();
    let mut byte = [0u8; 1];
    let idle = Duration::from_millis(SERIAL_POLL_INTERVAL_MS);

    loop {
        match stdin.read(&mut byte) {
            Ok(1) => {}
            // ESP-IDF's console reports "no data yet" as EOF or WouldBlock.
            Ok(_) => {
                thread::sleep(idle);
                continue;
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock || e.kind() == io::ErrorKind::Interrupted => {
                thread::sleep(idle);
                continue;
            }
            Err(e) => {
                log::warn!("Console read error: {}", e);
                thread::sleep(idle);
                continue;
            }
        }

        match reader.push_byte(byte[0]) {
            LineEvent::Complete(line) => {
                if let Some(command) = parse_command(&line) {
                    if command_tx.send(command).is_err() {
                        log::warn!("Command channel closed - exiting serial task");
                        return;
                    }
                }
            }
            LineEvent::Overflow => log::warn!("Console line longer than {} bytes dropped", SERIAL_LINE_MAX),
            LineEvent::None => {}
        }
    }
}
