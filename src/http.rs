// ShotLog - `/get_data` responses
//
// Maps a log snapshot to what the HTTP handler sends back. Kept free of the
// server types so it can be checked on the host.

use crate::event_log::LogError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpReply {
    /// The control loop did not answer in time.
    pub fn unavailable() -> Self {
        Self::error("Log snapshot unavailable".into())
    }

    fn error(body: String) -> Self {
        Self {
            status: 500,
            content_type: "text/plain",
            body,
        }
    }
}

pub fn get_data_reply(snapshot: Result<String, LogError>) -> HttpReply {
    match snapshot {
        Ok(body) => HttpReply {
            status: 200,
            content_type: "text/csv",
            body,
        },
        Err(LogError::Open { .. }) => HttpReply::error("Failed to open file".into()),
        Err(e) => HttpReply::error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn snapshot_is_served_as_csv() {
        let reply = get_data_reply(Ok("Timestamp,ShotCount\n100,1\n".into()));
        assert_eq!(reply.status, 200);
        assert_eq!(reply.content_type, "text/csv");
        assert_eq!(reply.body, "Timestamp,ShotCount\n100,1\n");
    }

    #[test]
    fn empty_log_is_still_a_success() {
        let reply = get_data_reply(Ok(String::new()));
        assert_eq!(reply.status, 200);
        assert!(reply.body.is_empty());
    }

    #[test]
    fn open_failure_is_a_plain_text_500() {
        let reply = get_data_reply(Err(LogError::Open {
            path: PathBuf::from("/spiffs/shots.csv"),
            mode: "reading",
            source: io::Error::from(io::ErrorKind::NotFound),
        }));
        assert_eq!(
            reply,
            HttpReply {
                status: 500,
                content_type: "text/plain",
                body: "Failed to open file".into(),
            }
        );
    }

    #[test]
    fn read_failure_names_the_file() {
        let reply = get_data_reply(Err(LogError::Read {
            path: PathBuf::from("/spiffs/shots.csv"),
            source: io::Error::from(io::ErrorKind::InvalidData),
        }));
        assert_eq!(reply.status, 500);
        assert_eq!(reply.body, "failed to read /spiffs/shots.csv");
    }
}
