//! Local callback listener address resolution
//!
//! Two options describe where the authorization code callback listener
//! binds: the current `--listen-address` list and the deprecated
//! `--listen-port` list. When any legacy port is given it wins outright and
//! the address list is ignored; the two are never merged.

/// Host used when expanding a legacy port into a bind address.
pub const LOOPBACK_HOST: &str = "127.0.0.1";

/// Bind addresses tried in order when the operator does not configure any.
pub const DEFAULT_LISTEN_ADDRESS: [&str; 2] = ["127.0.0.1:8000", "127.0.0.1:18000"];

/// Returns [`DEFAULT_LISTEN_ADDRESS`] as owned strings.
pub fn default_listen_address() -> Vec<String> {
    DEFAULT_LISTEN_ADDRESS.iter().map(|a| a.to_string()).collect()
}

/// Determines the addresses the callback listener should try, in order.
///
/// `listen_address` is always populated in practice because the
/// configuration layer supplies [`DEFAULT_LISTEN_ADDRESS`]. If `listen_port`
/// is empty the address list is returned unchanged. Otherwise one
/// `127.0.0.1:<port>` entry is produced per port, preserving port order.
///
/// # Examples
///
/// ```
/// use oidc_login::auth::listen::determine_listen_address;
///
/// let addresses = vec!["0.0.0.0:8000".to_string()];
/// assert_eq!(determine_listen_address(&addresses, &[]), addresses);
/// assert_eq!(
///     determine_listen_address(&addresses, &[10080, 20080]),
///     vec!["127.0.0.1:10080", "127.0.0.1:20080"]
/// );
/// ```
pub fn determine_listen_address(listen_address: &[String], listen_port: &[u16]) -> Vec<String> {
    if listen_port.is_empty() {
        return listen_address.to_vec();
    }
    tracing::warn!("--listen-port is deprecated, use --listen-address instead");
    listen_port
        .iter()
        .map(|port| format!("{}:{}", LOOPBACK_HOST, port))
        .collect()
}
