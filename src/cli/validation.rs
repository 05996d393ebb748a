//! Value parsers for CLI arguments

use std::net::Ipv4Addr;
use std::path::PathBuf;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    let port: u16 = port_str
        .parse()
        .map_err(|_| format!("Port must be a number between 1 and 65535, got: '{}'", port_str))?;

    if port == 0 {
        return Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string());
    }

    Ok(port)
}

/// The file must exist; whether it parses is the loader's concern.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }

    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    Ok(path)
}

pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got: '{}'", steps_str))?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        1..=20 => Ok(steps),
        _ => Err("Rollback steps cannot exceed 20".to_string()),
    }
}

pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }

    // Dotted digits must be a real IPv4 address
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return host
            .parse::<Ipv4Addr>()
            .map(|_| host.to_string())
            .map_err(|_| format!("Invalid IPv4 address: '{}'", host_str));
    }

    if host.len() > 253 {
        return Err("Host address is too long (maximum 253 characters)".to_string());
    }

    Ok(host.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ports() {
        for port in ["1", "80", "3000", "65535"] {
            assert!(validate_port(port).is_ok(), "{port} should be valid");
        }
        for port in ["0", "65536", "abc", "-1", ""] {
            assert!(validate_port(port).is_err(), "{port} should be invalid");
        }
    }

    #[test]
    fn test_hosts() {
        for host in ["localhost", "127.0.0.1", "0.0.0.0", "shop.internal"] {
            assert!(validate_host_address(host).is_ok(), "{host} should be valid");
        }
        let long = "x".repeat(300);
        for host in ["", "  ", "my host", "999.1.1.1", "1.2.3", long.as_str()] {
            assert!(validate_host_address(host).is_err(), "{host} should be invalid");
        }
    }

    #[test]
    fn test_rollback_steps() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("20"), Ok(20));
        for steps in ["0", "21", "x"] {
            assert!(validate_rollback_steps(steps).is_err(), "{steps} should be invalid");
        }
    }

    #[test]
    fn test_config_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert!(validate_config_file_path(&path).is_ok());

        let dir = tempfile::TempDir::new().unwrap();
        let dir_path = dir.path().to_string_lossy().to_string();
        assert!(validate_config_file_path(&dir_path).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }
}
