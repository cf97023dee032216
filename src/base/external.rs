use crate::base::error::{PingError, TransportError};
use crate::base::result::SweepReport;
use crate::base::strategy::Platform;
use log::debug;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

/// Loss and round-trip summary read from a `ping` process.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PingSummary {
    pub loss: f64,
    /// `(min, avg, max)` in milliseconds, absent when nothing came back.
    pub rtt: Option<(f64, f64, f64)>,
}

/// Drives the platform `ping` executable and reads its summary.
pub struct ExternalPing {
    program: PathBuf,
    platform: Platform,
    count: u16,
    size: usize,
    timeout: Duration,
}

impl ExternalPing {
    pub fn new(program: impl Into<PathBuf>, platform: Platform, count: u16, size: usize, timeout: Duration) -> Self {
        ExternalPing {
            program: program.into(),
            platform,
            count,
            size,
            timeout,
        }
    }

    /// Looks `ping` up on `PATH`.
    pub fn locate(platform: Platform, count: u16, size: usize, timeout: Duration) -> Result<Self, PingError> {
        let program = which::which("ping")
            .map_err(|e| PingError::Unsupported(format!("no ping executable: {e}")))?;
        Ok(Self::new(program, platform, count, size, timeout))
    }

    pub fn command_args(&self, addr: &str) -> Vec<String> {
        match self.platform {
            Platform::Gnu => vec![
                "-c".to_string(),
                self.count.to_string(),
                "-s".to_string(),
                self.size.to_string(),
                "-W".to_string(),
                self.timeout.as_secs_f64().ceil().max(1.0).to_string(),
                addr.to_string(),
            ],
            Platform::Microsoft => vec![
                "-4".to_string(),
                "-n".to_string(),
                self.count.to_string(),
                "-l".to_string(),
                self.size.to_string(),
                "-w".to_string(),
                self.timeout.as_millis().max(1).to_string(),
                addr.to_string(),
            ],
        }
    }

    pub fn run(&self, addr: &str) -> Result<SweepReport, PingError> {
        let args = self.command_args(addr);
        debug!("running {} {}", self.program.display(), args.join(" "));
        // a non-zero exit only means packets were lost, the summary is still printed
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|e| TransportError::ProcessFailed(e.to_string()))?;
        let text = String::from_utf8_lossy(&output.stdout);

        let summary = match self.platform {
            Platform::Gnu => parse_gnu_output(&text),
            Platform::Microsoft => parse_microsoft_output(&text),
        }
        .ok_or_else(|| TransportError::OutputParseFailed(format!("no summary for {addr}")))?;

        let (mint, avgt, maxt) = match summary.rtt {
            Some((min, avg, max)) => (Some(min), Some(avg), Some(max)),
            None => (None, None, None),
        };
        Ok(SweepReport {
            addr: addr.to_string(),
            loss: summary.loss,
            mint,
            maxt,
            avgt,
            ipv: 4,
            count: self.count,
            size: self.size,
            attempts: Vec::new(),
        })
    }
}

/// Reads the `x% packet loss` line and the `min/avg/max[/mdev] = a/b/c[/d] ms`
/// line printed by iputils, BusyBox and BSD `ping`.
pub fn parse_gnu_output(text: &str) -> Option<PingSummary> {
    let loss_line = text.lines().find(|line| line.contains("packet loss"))?;
    let loss = loss_line
        .split(|c: char| c == ',' || c.is_whitespace())
        .find_map(|token| token.strip_suffix('%'))?
        .parse::<f64>()
        .ok()?
        / 100.0;

    let rtt = text
        .lines()
        .find(|line| line.contains("min/avg/max"))
        .and_then(|line| {
            let values = line.split_once('=')?.1.split_whitespace().next()?;
            let mut values = values.split('/').map(|v| v.parse::<f64>().ok());
            Some((values.next()??, values.next()??, values.next()??))
        });

    Some(PingSummary { loss, rtt })
}

/// Collects the numbers directly followed by `%` or `ms` in the last four
/// lines of `ping.exe` output: loss, minimum, maximum, average. Keying on the
/// units rather than the labels keeps localized output readable.
pub fn parse_microsoft_output(text: &str) -> Option<PingSummary> {
    let lines: Vec<&str> = text.trim_end().lines().collect();
    let summary = lines[lines.len().saturating_sub(4)..].join("\n");
    let numbers = numbers_before_units(&summary);

    let loss = *numbers.first()? / 100.0;
    let rtt = match numbers[..] {
        [_, min, max, avg, ..] => Some((min, avg, max)),
        _ => None,
    };
    Some(PingSummary { loss, rtt })
}

fn numbers_before_units(text: &str) -> Vec<f64> {
    let bytes = text.as_bytes();
    let mut numbers = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        let rest = &text[i..];
        if rest.starts_with('%') || rest.starts_with("ms") {
            if let Ok(number) = text[start..i].parse::<f64>() {
                numbers.push(number);
            }
        }
    }
    numbers
}

#[cfg(test)]
mod tests {
    use super::*;

    const MICROSOFT_PARTIAL: &str = "
Pinging 8.8.8.8 with 32 bytes of data:
Reply from 8.8.8.8: bytes=32 time=41ms TTL=45
Reply from 8.8.8.8: bytes=32 time=42ms TTL=45
Reply from 8.8.8.8: bytes=32 time=42ms TTL=45
Request timed out.

Ping statistics for 8.8.8.8:
    Packets: Sent = 4, Received = 3, Lost = 1 (25% loss),
Approximate round trip times in milli-seconds:
    Minimum = 41ms, Maximum = 42ms, Average = 41ms
";

    const MICROSOFT_LOST: &str = "
Pinging 10.255.255.1 with 32 bytes of data:
Request timed out.
Request timed out.

Ping statistics for 10.255.255.1:
    Packets: Sent = 2, Received = 0, Lost = 2 (100% loss),
";

    const GNU_PARTIAL: &str = "PING 1.1.1.1 (1.1.1.1) 56(84) bytes of data.
64 bytes from 1.1.1.1: icmp_seq=1 ttl=57 time=5.12 ms
64 bytes from 1.1.1.1: icmp_seq=3 ttl=57 time=4.87 ms

--- 1.1.1.1 ping statistics ---
4 packets transmitted, 2 received, 50% packet loss, time 3004ms
rtt min/avg/max/mdev = 4.870/4.995/5.120/0.125 ms
";

    const GNU_LOST: &str = "PING 10.255.255.1 (10.255.255.1) 56(84) bytes of data.

--- 10.255.255.1 ping statistics ---
3 packets transmitted, 0 received, 100% packet loss, time 2030ms

";

    const BSD: &str = "--- 127.0.0.1 ping statistics ---
2 packets transmitted, 2 packets received, 0.0% packet loss
round-trip min/avg/max/stddev = 0.051/0.064/0.077/0.013 ms
";

    #[test]
    fn test_parse_microsoft() {
        let summary = parse_microsoft_output(MICROSOFT_PARTIAL).unwrap();
        assert_eq!(summary.loss, 0.25);
        assert_eq!(summary.rtt, Some((41.0, 41.0, 42.0)));

        let summary = parse_microsoft_output(MICROSOFT_LOST).unwrap();
        assert_eq!(summary.loss, 1.0);
        assert_eq!(summary.rtt, None);

        assert_eq!(parse_microsoft_output("garbage"), None);
    }

    #[test]
    fn test_parse_gnu() {
        let summary = parse_gnu_output(GNU_PARTIAL).unwrap();
        assert_eq!(summary.loss, 0.5);
        assert_eq!(summary.rtt, Some((4.87, 4.995, 5.12)));

        let summary = parse_gnu_output(GNU_LOST).unwrap();
        assert_eq!(summary.loss, 1.0);
        assert_eq!(summary.rtt, None);

        let summary = parse_gnu_output(BSD).unwrap();
        assert_eq!(summary.loss, 0.0);
        assert_eq!(summary.rtt, Some((0.051, 0.064, 0.077)));

        assert_eq!(parse_gnu_output("ping: unknown host"), None);
    }

    #[test]
    fn test_command_args() {
        let gnu = ExternalPing::new("ping", Platform::Gnu, 4, 32, Duration::from_millis(1500));
        assert_eq!(gnu.command_args("localhost"), ["-c", "4", "-s", "32", "-W", "2", "localhost"]);

        let microsoft = ExternalPing::new("ping.exe", Platform::Microsoft, 2, 64, Duration::from_secs(3));
        assert_eq!(
            microsoft.command_args("localhost"),
            ["-4", "-n", "2", "-l", "64", "-w", "3000", "localhost"]
        );
    }
}
