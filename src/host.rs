//! Best-effort lookup of this machine's network address.

use tracing::debug;

/// Address used when the local address cannot be determined.
pub const LOOPBACK_ADDRESS: &str = "127.0.0.1";

/// Returns this machine's local network address as text.
///
/// Never fails: when no address can be resolved, [`LOOPBACK_ADDRESS`] is
/// returned instead.
pub fn host_address() -> String {
    match local_ip_address::local_ip() {
        Ok(ip) => ip.to_string(),
        Err(e) => {
            debug!(error = %e, fallback = LOOPBACK_ADDRESS, "Local address unavailable");
            LOOPBACK_ADDRESS.to_string()
        }
    }
}
