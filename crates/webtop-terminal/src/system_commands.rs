//! System and power commands: date, whoami, uname, uptime, ps, free, df,
//! ping, shutdown, reboot, logout.
//!
//! Process, memory and disk figures are fixed; there is no real machine
//! behind them.

use webtop_types::error::{Result, WebtopError};

use crate::interpreter::{Command, CommandOutput, CommandRegistry, Environment, PowerAction};

/// Register system and power commands into a registry.
pub fn register_system_commands(reg: &mut CommandRegistry) {
    reg.register(Box::new(DateCmd));
    reg.register(Box::new(WhoamiCmd));
    reg.register(Box::new(HostnameCmd));
    reg.register(Box::new(UnameCmd));
    reg.register(Box::new(UptimeCmd));
    reg.register(Box::new(StaticCmd {
        name: "ps",
        description: "List processes",
        text: PS_TABLE,
    }));
    reg.register(Box::new(StaticCmd {
        name: "free",
        description: "Show memory usage",
        text: FREE_TABLE,
    }));
    reg.register(Box::new(StaticCmd {
        name: "df",
        description: "Show disk usage",
        text: DF_TABLE,
    }));
    reg.register(Box::new(PingCmd));
    reg.register(Box::new(PowerCmd {
        name: "shutdown",
        description: "Power off the desktop",
        action: PowerAction::Shutdown,
    }));
    reg.register(Box::new(PowerCmd {
        name: "reboot",
        description: "Restart the desktop",
        action: PowerAction::Reboot,
    }));
    reg.register(Box::new(PowerCmd {
        name: "logout",
        description: "End the session",
        action: PowerAction::Logout,
    }));
}

// ---------------------------------------------------------------------------
// date
// ---------------------------------------------------------------------------

struct DateCmd;
impl Command for DateCmd {
    fn name(&self) -> &str {
        "date"
    }
    fn description(&self) -> &str {
        "Show current date and time"
    }
    fn usage(&self) -> &str {
        "date"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        match env.time {
            Some(time) => Ok(CommandOutput::Text(time.now()?.to_string())),
            None => Err(WebtopError::Command(
                "date: no time service available".to_string(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// uptime
// ---------------------------------------------------------------------------

struct UptimeCmd;
impl Command for UptimeCmd {
    fn name(&self) -> &str {
        "uptime"
    }
    fn description(&self) -> &str {
        "Show session uptime"
    }
    fn usage(&self) -> &str {
        "uptime"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        if let Some(time) = env.time {
            let secs = time.uptime_secs()?;
            Ok(CommandOutput::Text(format!("up {} minutes", secs / 60)))
        } else {
            Err(WebtopError::Command(
                "uptime: no time service available".to_string(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// whoami / hostname / uname
// ---------------------------------------------------------------------------

struct WhoamiCmd;
impl Command for WhoamiCmd {
    fn name(&self) -> &str {
        "whoami"
    }
    fn description(&self) -> &str {
        "Print current user name"
    }
    fn usage(&self) -> &str {
        "whoami"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.config.user.clone()))
    }
}

struct HostnameCmd;
impl Command for HostnameCmd {
    fn name(&self) -> &str {
        "hostname"
    }
    fn description(&self) -> &str {
        "Print host name"
    }
    fn usage(&self) -> &str {
        "hostname"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.config.hostname.clone()))
    }
}

struct UnameCmd;
impl Command for UnameCmd {
    fn name(&self) -> &str {
        "uname"
    }
    fn description(&self) -> &str {
        "Print system information"
    }
    fn usage(&self) -> &str {
        "uname"
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(env.config.kernel.clone()))
    }
}

// ---------------------------------------------------------------------------
// ps / free / df
// ---------------------------------------------------------------------------

const PS_TABLE: &str = "  PID TTY          TIME CMD
    1 ?        00:00:01 init
  123 ?        00:00:00 kernel
  456 pts/0    00:00:00 bash
  789 pts/0    00:00:00 ps";

const FREE_TABLE: &str = "              total        used        free      shared
Mem:        8192000     2048000     6144000           0
Swap:             0           0           0";

const DF_TABLE: &str = "Filesystem     1K-blocks    Used Available Use% Mounted on
/dev/web1        1000000  250000    750000  25% /
tmpfs             100000       0    100000   0% /tmp";

/// A command that prints a fixed table.
struct StaticCmd {
    name: &'static str,
    description: &'static str,
    text: &'static str,
}

impl Command for StaticCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn usage(&self) -> &str {
        self.name
    }
    fn category(&self) -> &str {
        "system"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        Ok(CommandOutput::Text(self.text.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ping
// ---------------------------------------------------------------------------

struct PingCmd;
impl Command for PingCmd {
    fn name(&self) -> &str {
        "ping"
    }
    fn description(&self) -> &str {
        "Send two simulated echo requests"
    }
    fn usage(&self) -> &str {
        "ping [host]"
    }
    fn category(&self) -> &str {
        "network"
    }
    fn execute(&self, args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        let host = args.first().copied().unwrap_or("localhost");
        Ok(CommandOutput::Text(format!(
            "PING {host} (127.0.0.1): 56 data bytes\n\
             64 bytes from 127.0.0.1: icmp_seq=0 time=0.1ms\n\
             64 bytes from 127.0.0.1: icmp_seq=1 time=0.1ms\n\
             --- {host} ping statistics ---\n\
             2 packets transmitted, 2 packets received, 0.0% packet loss"
        )))
    }
}

// ---------------------------------------------------------------------------
// shutdown / reboot / logout
// ---------------------------------------------------------------------------

struct PowerCmd {
    name: &'static str,
    description: &'static str,
    action: PowerAction,
}

impl Command for PowerCmd {
    fn name(&self) -> &str {
        self.name
    }
    fn description(&self) -> &str {
        self.description
    }
    fn usage(&self) -> &str {
        self.name
    }
    fn category(&self) -> &str {
        "power"
    }
    fn execute(&self, _args: &[&str], _env: &mut Environment<'_>) -> Result<CommandOutput> {
        log::info!("terminal: {} requested", self.name);
        Ok(CommandOutput::Power(self.action))
    }
}
