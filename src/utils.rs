use std::io;
use std::net::IpAddr;
use std::process::Command;

/// URL a local browser should use for the configured listen host.
/// Wildcard binds are reached through loopback; IPv6 literals are bracketed.
pub fn browser_url(host: &str, port: u16) -> String {
    let bare = host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(IpAddr::V4(ip)) if ip.is_unspecified() => format!("http://127.0.0.1:{}", port),
        Ok(IpAddr::V6(ip)) if ip.is_unspecified() => format!("http://[::1]:{}", port),
        Ok(IpAddr::V6(ip)) => format!("http://[{}]:{}", ip, port),
        _ => format!("http://{}:{}", bare, port),
    }
}

// Platform command that hands a URL to the desktop's default browser
fn launcher() -> Option<(&'static str, &'static [&'static str])> {
    if cfg!(target_os = "macos") {
        Some(("open", &[]))
    } else if cfg!(target_os = "windows") {
        Some(("cmd", &["/C", "start", ""]))
    } else if cfg!(unix) {
        Some(("xdg-open", &[]))
    } else {
        None
    }
}

pub fn open_in_browser(host: &str, port: u16) -> io::Result<String> {
    let url = browser_url(host, port);
    let (program, args) = launcher().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::Unsupported,
            format!("no browser launcher for {}", std::env::consts::OS),
        )
    })?;
    Command::new(program).args(args).arg(&url).spawn()?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_hosts_map_to_loopback() {
        assert_eq!(browser_url("0.0.0.0", 3001), "http://127.0.0.1:3001");
        assert_eq!(browser_url("::", 3001), "http://[::1]:3001");
    }

    #[test]
    fn ipv6_literals_are_bracketed_once() {
        assert_eq!(browser_url("::1", 8080), "http://[::1]:8080");
        assert_eq!(browser_url("[fe80::1]", 8080), "http://[fe80::1]:8080");
    }

    #[test]
    fn names_and_ipv4_pass_through() {
        assert_eq!(browser_url("localhost", 3001), "http://localhost:3001");
        assert_eq!(browser_url("192.168.1.4", 8080), "http://192.168.1.4:8080");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(launcher().map(|(program, _)| program), Some("xdg-open"));
    }
}
