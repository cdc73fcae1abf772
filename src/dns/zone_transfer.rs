//! AXFR zone transfer over TCP.
//!
//! The request is a single AXFR query; the response is a stream of
//! length-prefixed DNS messages that begins and ends with the zone's SOA
//! record. Timeouts are applied by the caller.

use std::net::SocketAddr;

use hickory_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_resolver::proto::rr::{Record, RecordType as ProtoRecordType};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use super::hickory::{to_fqdn, trim_root};
use super::types::LookupError;
use crate::config::MAX_ZONE_TRANSFER_RECORDS;

/// Performs an AXFR of `domain` against `server` and returns every record as
/// `"<name> <type> <data>"`.
pub(crate) async fn transfer_zone(
    server: SocketAddr,
    domain: &str,
) -> Result<Vec<String>, LookupError> {
    let request = build_axfr_request(domain)?;

    let mut stream = TcpStream::connect(server).await.map_err(io_error)?;

    let len = u16::try_from(request.len())
        .map_err(|_| LookupError::Transport("AXFR request too large".to_string()))?;
    let mut framed = Vec::with_capacity(request.len() + 2);
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(&request);
    stream.write_all(&framed).await.map_err(io_error)?;
    stream.flush().await.map_err(io_error)?;

    let mut collector = AxfrCollector::default();
    loop {
        let mut len_bytes = [0u8; 2];
        match stream.read_exact(&mut len_bytes).await {
            Ok(_) => {}
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                return Err(LookupError::Transport(
                    "connection closed before the closing SOA record".to_string(),
                ));
            }
            Err(e) => return Err(io_error(e)),
        }

        let msg_len = u16::from_be_bytes(len_bytes) as usize;
        let mut buffer = vec![0u8; msg_len];
        stream.read_exact(&mut buffer).await.map_err(io_error)?;

        let message = Message::from_vec(&buffer)
            .map_err(|e| LookupError::Transport(format!("malformed AXFR response: {e}")))?;
        if collector.push_message(&message)? {
            return Ok(collector.into_records());
        }
    }
}

fn build_axfr_request(domain: &str) -> Result<Vec<u8>, LookupError> {
    let zone = to_fqdn(domain)?;
    let mut message = Message::new();
    message
        .set_id(rand::random::<u16>())
        .set_message_type(MessageType::Query)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(false);
    message.add_query(Query::query(zone, ProtoRecordType::AXFR));
    message
        .to_vec()
        .map_err(|e| LookupError::Transport(format!("failed to encode AXFR request: {e}")))
}

fn io_error(e: std::io::Error) -> LookupError {
    if e.kind() == std::io::ErrorKind::TimedOut {
        LookupError::Timeout
    } else {
        LookupError::Transport(e.to_string())
    }
}

/// Accumulates records across the messages of one AXFR response.
#[derive(Debug, Default)]
pub(crate) struct AxfrCollector {
    soa_seen: usize,
    records: Vec<String>,
}

impl AxfrCollector {
    /// Consumes one response message. Returns `true` once the closing SOA
    /// has been seen.
    pub(crate) fn push_message(&mut self, message: &Message) -> Result<bool, LookupError> {
        match message.response_code() {
            ResponseCode::NoError => {}
            ResponseCode::Refused => {
                return Err(LookupError::Transport(
                    "zone transfer refused by server".to_string(),
                ))
            }
            ResponseCode::NXDomain => return Err(LookupError::NotFound),
            other => return Err(LookupError::Transport(format!("server responded with {other}"))),
        }

        for record in message.answers() {
            if record.record_type() == ProtoRecordType::SOA {
                self.soa_seen += 1;
            }
            self.records.push(format_record(record));

            if self.soa_seen >= 2 {
                return Ok(true);
            }
            if self.records.len() >= MAX_ZONE_TRANSFER_RECORDS {
                return Err(LookupError::Transport(format!(
                    "zone transfer exceeded {MAX_ZONE_TRANSFER_RECORDS} records"
                )));
            }
        }

        if message.answers().is_empty() && self.soa_seen == 0 {
            return Err(LookupError::Transport(
                "empty AXFR response".to_string(),
            ));
        }
        Ok(false)
    }

    pub(crate) fn into_records(self) -> Vec<String> {
        self.records
    }
}

fn format_record(record: &Record) -> String {
    let name = trim_root(record.name());
    match record.data() {
        Some(rdata) => format!("{} {} {}", name, record.record_type(), rdata),
        None => format!("{} {}", name, record.record_type()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::rr::rdata::{A, SOA};
    use hickory_resolver::proto::rr::{Name, RData};
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).expect("valid name")
    }

    fn soa_record() -> Record {
        Record::from_rdata(
            name("example.com."),
            3600,
            RData::SOA(SOA::new(
                name("ns1.example.com."),
                name("hostmaster.example.com."),
                1,
                7200,
                3600,
                1_209_600,
                300,
            )),
        )
    }

    fn a_record(host: &str) -> Record {
        Record::from_rdata(name(host), 300, RData::A(A::new(192, 0, 2, 10)))
    }

    fn response(records: Vec<Record>) -> Message {
        let mut message = Message::new();
        message.set_message_type(MessageType::Response);
        for record in records {
            message.add_answer(record);
        }
        message
    }

    #[test]
    fn test_single_message_transfer() {
        let mut collector = AxfrCollector::default();
        let message = response(vec![soa_record(), a_record("www.example.com."), soa_record()]);
        assert!(collector.push_message(&message).expect("valid stream"));
        let records = collector.into_records();
        assert_eq!(records.len(), 3);
        assert!(records[1].starts_with("www.example.com A 192.0.2.10"), "{:?}", records[1]);
    }

    #[test]
    fn test_multi_message_transfer() {
        let mut collector = AxfrCollector::default();
        let first = response(vec![soa_record(), a_record("www.example.com.")]);
        let second = response(vec![a_record("mail.example.com."), soa_record()]);
        assert!(!collector.push_message(&first).expect("valid"));
        assert!(collector.push_message(&second).expect("valid"));
        assert_eq!(collector.into_records().len(), 4);
    }

    #[test]
    fn test_refused_transfer() {
        let mut collector = AxfrCollector::default();
        let mut message = response(Vec::new());
        message.set_response_code(ResponseCode::Refused);
        assert!(matches!(
            collector.push_message(&message),
            Err(LookupError::Transport(reason)) if reason.contains("refused")
        ));
    }

    #[test]
    fn test_empty_response_is_error() {
        let mut collector = AxfrCollector::default();
        assert!(collector.push_message(&response(Vec::new())).is_err());
    }

    #[test]
    fn test_build_request_encodes_axfr_query() {
        let bytes = build_axfr_request("example.com").expect("encodes");
        let decoded = Message::from_vec(&bytes).expect("decodes");
        assert_eq!(decoded.queries().len(), 1);
        assert_eq!(decoded.queries()[0].query_type(), ProtoRecordType::AXFR);
        assert_eq!(trim_root(decoded.queries()[0].name()), "example.com");
    }
}
