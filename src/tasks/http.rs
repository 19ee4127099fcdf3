// ShotLog - HTTP Log Endpoint
//
// `GET /get_data` returns the shot log as CSV. The ESP-IDF server runs
// handlers on its own thread, so the handler only asks the control loop for
// a snapshot and waits for the answer.

use std::sync::mpsc::{self, Sender};
use std::time::Duration;

use esp_idf_svc::http::server::{Configuration, EspHttpServer};
use esp_idf_svc::http::Method;
use esp_idf_svc::io::{EspIOError, Write};

use crate::config::*;
use crate::events::SnapshotRequest;
use crate::http::{get_data_reply, HttpReply};

pub fn start_server(snapshot_tx: Sender<SnapshotRequest>) -> anyhow::Result<EspHttpServer<'static>> {
    let server_config = Configuration {
        http_port: HTTP_PORT,
        ..Default::default()
    };
    let mut server = EspHttpServer::new(&server_config)?;

    server.fn_handler(GET_DATA_URI, Method::Get, move |req| -> Result<(), EspIOError> {
        let reply = request_snapshot(&snapshot_tx);
        let content_length = reply.body.len().to_string();

        let mut response = req.into_response(
            reply.status,
            None,
            &[
                ("Content-Type", reply.content_type),
                ("Content-Length", &content_length),
            ],
        )?;
        response.write_all(reply.body.as_bytes())?;
        Ok(())
    })?;

    log::info!("HTTP server started on port {}", HTTP_PORT);
    Ok(server)
}

fn request_snapshot(snapshot_tx: &Sender<SnapshotRequest>) -> HttpReply {
    let (reply, reply_rx) = mpsc::sync_channel(1);
    if snapshot_tx.send(SnapshotRequest { reply }).is_err() {
        log::warn!("Control loop gone - cannot serve {}", GET_DATA_URI);
        return HttpReply::unavailable();
    }

    match reply_rx.recv_timeout(Duration::from_millis(HTTP_SNAPSHOT_WAIT_MS)) {
        Ok(snapshot) => {
            if let Err(e) = &snapshot {
                log::error!("Failed to read log for {}: {}", GET_DATA_URI, e);
            }
            get_data_reply(snapshot)
        }
        Err(_) => HttpReply::unavailable(),
    }
}
