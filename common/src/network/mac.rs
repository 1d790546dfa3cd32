use pnet::util::MacAddr;

/// Normalizes a hardware-address token from a neighbor table.
///
/// Hyphen-separated (`AA-BB-CC-DD-EE-FF`) and colon-separated forms are both
/// accepted, case-insensitively, as are single-digit groups (`0:1a:2b:3:4:5`).
/// Anything that is not six hex groups yields `None`.
pub fn parse_hardware_addr(token: &str) -> Option<MacAddr> {
    let normalized: String = token.replace('-', ":").to_ascii_lowercase();

    let octets: Vec<u8> = normalized
        .split(':')
        .map(parse_group)
        .collect::<Option<_>>()?;

    let [a, b, c, d, e, f] = octets[..] else {
        return None;
    };
    Some(MacAddr::new(a, b, c, d, e, f))
}

fn parse_group(group: &str) -> Option<u8> {
    if group.is_empty() || group.len() > 2 || !group.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(group, 16).ok()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
