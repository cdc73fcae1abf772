//! Built-in subdomain label lists.

/// Reduced list used by quick mode.
pub const QUICK_LABELS: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "blog", "shop", "dev", "test", "vpn", "ns1", "ns2",
    "smtp", "webmail", "portal", "staging",
];

/// Default list used when no custom wordlist is given.
pub const DEFAULT_LABELS: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "blog", "shop", "dev", "test", "vpn", "ns1", "ns2",
    "ns3", "smtp", "pop", "pop3", "imap", "webmail", "portal", "staging", "stage", "beta",
    "demo", "app", "apps", "m", "mobile", "cdn", "static", "assets", "img", "images", "media",
    "files", "download", "downloads", "docs", "help", "support", "status", "store", "secure",
    "login", "auth", "sso", "id", "account", "accounts", "dashboard", "panel", "cpanel", "whm",
    "autodiscover", "autoconfig", "mx", "mx1", "mx2", "exchange", "owa", "remote", "gateway",
    "proxy", "intranet", "internal", "extranet", "git", "gitlab", "jenkins", "ci", "jira",
    "confluence", "wiki", "forum", "community", "news", "events", "old", "new", "legacy",
    "backup", "db", "mysql", "sql", "monitor", "grafana", "kibana", "elastic", "search", "mta",
    "relay", "chat", "crm", "erp", "hr", "billing", "pay", "payments", "cloud", "s3", "k8s",
    "uat", "qa", "sandbox", "preprod", "prod", "origin", "edge", "lb", "web", "web1", "web2",
    "server", "host", "office", "dns", "time", "ntp", "ldap", "partners", "developer",
    "developers", "sip", "voip", "video", "email", "marketing", "go", "link", "links", "info",
];
