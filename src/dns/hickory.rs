//! `hickory-resolver` backed implementation of [`DnsResolver`].

use std::net::SocketAddr;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::proto::error::ProtoErrorKind;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{Name, RData};
use hickory_resolver::TokioAsyncResolver;
use log::debug;

use super::resolver::DnsResolver;
use super::types::{LookupError, RecordType};
use super::zone_transfer::transfer_zone;
use crate::config::DNS_PORT;

/// Production resolver: record lookups through a `TokioAsyncResolver`,
/// zone transfers over TCP straight to the nameserver.
pub struct HickoryResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryResolver {
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DnsResolver for HickoryResolver {
    async fn lookup(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Vec<String>, LookupError> {
        let fqdn = to_fqdn(name)?;
        match self.resolver.lookup(fqdn, record_type.into()).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .filter_map(|rdata| format_rdata(rdata, record_type))
                .collect()),
            Err(e) => {
                let error = classify_resolve_error(&e);
                if let LookupError::Transport(ref reason) = error {
                    debug!("{record_type} lookup failed for {name}: {reason}");
                }
                Err(error)
            }
        }
    }

    async fn zone_transfer(
        &self,
        domain: &str,
        nameserver: &str,
    ) -> Result<Vec<String>, LookupError> {
        let ns_name = to_fqdn(nameserver)?;
        let addresses = self
            .resolver
            .lookup_ip(ns_name)
            .await
            .map_err(|e| classify_resolve_error(&e))?;
        let ip = addresses.iter().next().ok_or(LookupError::NotFound)?;
        transfer_zone(SocketAddr::new(ip, DNS_PORT), domain).await
    }
}

/// Parses `name` as an absolute name so no search domains are appended.
pub(crate) fn to_fqdn(name: &str) -> Result<Name, LookupError> {
    let mut fqdn = Name::from_ascii(name)
        .map_err(|e| LookupError::Transport(format!("invalid name '{name}': {e}")))?;
    fqdn.set_fqdn(true);
    Ok(fqdn)
}

/// Strips the trailing root dot from a rendered name.
pub(crate) fn trim_root(name: &Name) -> String {
    name.to_utf8().trim_end_matches('.').to_string()
}

/// Renders one answer as text, keeping only answers of the requested type.
///
/// CNAME chains in an A answer therefore contribute only the final addresses.
fn format_rdata(rdata: &RData, record_type: RecordType) -> Option<String> {
    match (rdata, record_type) {
        (RData::A(a), RecordType::A) => Some(a.to_string()),
        (RData::AAAA(aaaa), RecordType::AAAA) => Some(aaaa.to_string()),
        (RData::CNAME(cname), RecordType::CNAME) => Some(trim_root(&cname.0)),
        (RData::NS(ns), RecordType::NS) => Some(trim_root(&ns.0)),
        (RData::MX(mx), RecordType::MX) => {
            Some(format!("{} {}", mx.preference(), trim_root(mx.exchange())))
        }
        // TXT records can contain multiple strings - join them
        (RData::TXT(txt), RecordType::TXT) => Some(
            txt.iter()
                .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                .collect::<Vec<String>>()
                .join(""),
        ),
        _ => None,
    }
}

/// Maps a resolver error onto the lookup taxonomy.
///
/// NXDOMAIN and empty answers are `NotFound`; server failures and refusals
/// carried in a negative response are transport errors.
pub(crate) fn classify_resolve_error(error: &ResolveError) -> LookupError {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound { response_code, .. } => match *response_code {
            ResponseCode::NoError | ResponseCode::NXDomain => LookupError::NotFound,
            code => LookupError::Transport(format!("server responded with {code}")),
        },
        ResolveErrorKind::Timeout => LookupError::Timeout,
        ResolveErrorKind::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
            LookupError::Timeout
        }
        ResolveErrorKind::Proto(proto) if matches!(proto.kind(), ProtoErrorKind::Timeout) => {
            LookupError::Timeout
        }
        _ => LookupError::Transport(error.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_resolver::proto::rr::rdata::{A, CNAME, MX, NS, TXT};
    use std::str::FromStr;

    fn name(s: &str) -> Name {
        Name::from_str(s).expect("valid name")
    }

    #[test]
    fn test_format_rdata_a() {
        let rdata = RData::A(A::new(93, 184, 216, 34));
        assert_eq!(
            format_rdata(&rdata, RecordType::A).as_deref(),
            Some("93.184.216.34")
        );
    }

    #[test]
    fn test_format_rdata_filters_other_types() {
        let cname = RData::CNAME(CNAME(name("target.example.com.")));
        assert_eq!(format_rdata(&cname, RecordType::A), None);
        assert_eq!(
            format_rdata(&cname, RecordType::CNAME).as_deref(),
            Some("target.example.com")
        );
    }

    #[test]
    fn test_format_rdata_mx_and_ns() {
        let mx = RData::MX(MX::new(10, name("mail.example.com.")));
        assert_eq!(
            format_rdata(&mx, RecordType::MX).as_deref(),
            Some("10 mail.example.com")
        );
        let ns = RData::NS(NS(name("ns1.example.com.")));
        assert_eq!(
            format_rdata(&ns, RecordType::NS).as_deref(),
            Some("ns1.example.com")
        );
    }

    #[test]
    fn test_format_rdata_txt_joins_strings() {
        let txt = RData::TXT(TXT::new(vec![
            "v=spf1 include:_spf.example.com".to_string(),
            " ~all".to_string(),
        ]));
        assert_eq!(
            format_rdata(&txt, RecordType::TXT).as_deref(),
            Some("v=spf1 include:_spf.example.com ~all")
        );
    }

    #[test]
    fn test_classify_timeout() {
        let error = ResolveError::from(ResolveErrorKind::Timeout);
        assert_eq!(classify_resolve_error(&error), LookupError::Timeout);
    }

    #[test]
    fn test_classify_other_errors_as_transport() {
        let error = ResolveError::from("connection refused");
        assert!(matches!(
            classify_resolve_error(&error),
            LookupError::Transport(reason) if reason.contains("connection refused")
        ));
    }

    #[test]
    fn test_to_fqdn() {
        let fqdn = to_fqdn("www.example.com").expect("valid");
        assert!(fqdn.is_fqdn());
        assert_eq!(trim_root(&fqdn), "www.example.com");
    }
}
