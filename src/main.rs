use std::collections::BTreeMap;
use std::io::Write;
use std::sync::Arc;

use camino::Utf8PathBuf;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::signal::unix::SignalKind;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;

use huebind::backend::memory::MemoryBridge;
use huebind::config::{self, AppConfig};
use huebind::console::ConsoleCommand;
use huebind::error::{ApiError, ApiResult};
use huebind::handler::{GroupHandle, GroupHandler};
use huebind::model::channel::ChannelUpdate;
use huebind::model::session::CommandSession;

const UPDATE_CAPACITY: usize = 128;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: Utf8PathBuf,
}

/*
 * Formatter function to output in syslog format. This makes sense when running
 * as a service (where output might go to a log file, or the system journal)
 */
#[allow(clippy::match_same_arms)]
fn syslog_format(
    buf: &mut pretty_env_logger::env_logger::fmt::Formatter,
    record: &log::Record,
) -> std::io::Result<()> {
    writeln!(
        buf,
        "<{}>{}: {}",
        match record.level() {
            log::Level::Error => 3,
            log::Level::Warn => 4,
            log::Level::Info => 6,
            log::Level::Debug => 7,
            log::Level::Trace => 7,
        },
        record.target(),
        record.args()
    )
}

fn init_logging() -> ApiResult<()> {
    /* Try to provide reasonable default filters, when RUST_LOG is not specified */
    const DEFAULT_LOG_FILTERS: &[&str] = &["debug", "huebind::handler::alert=info"];

    let log_filters = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTERS.join(","));

    /* Detect if we need syslog or human-readable formatting */
    if std::env::var("SYSTEMD_EXEC_PID").is_ok_and(|pid| pid == std::process::id().to_string()) {
        Ok(pretty_env_logger::env_logger::builder()
            .format(syslog_format)
            .parse_filters(&log_filters)
            .try_init()?)
    } else {
        Ok(pretty_env_logger::formatted_timed_builder()
            .parse_filters(&log_filters)
            .try_init()?)
    }
}

async fn wait_for_shutdown() -> ApiResult<&'static str> {
    let mut sigterm = signal::unix::signal(SignalKind::terminate())?;

    let msg = tokio::select! {
        _ = signal::ctrl_c() => "Ctrl-C pressed, exiting..",
        _ = sigterm.recv() => "SIGTERM received, exiting..",
    };

    Ok(msg)
}

async fn report_channel_updates(mut rx: broadcast::Receiver<ChannelUpdate>) {
    loop {
        match rx.recv().await {
            Ok(upd) => log::info!("[{}] {} = {}", upd.group, upd.channel, upd.state),
            Err(RecvError::Lagged(count)) => log::warn!("Dropped {count} channel updates"),
            Err(RecvError::Closed) => break,
        }
    }
}

struct Console {
    bridge: Arc<MemoryBridge>,
    handles: BTreeMap<String, GroupHandle>,
    state_file: Utf8PathBuf,
}

impl Console {
    fn handle(&self, group: &str) -> ApiResult<&GroupHandle> {
        self.handles
            .get(group)
            .ok_or_else(|| ApiError::GroupNotFound(group.to_string()))
    }

    async fn execute(&self, cmd: ConsoleCommand) -> ApiResult<()> {
        match cmd {
            ConsoleCommand::Channel {
                group,
                channel,
                command,
            } => self.handle(&group)?.command(channel, command),
            ConsoleCommand::TransitionTime {
                group,
                transition_time,
            } => self.handle(&group)?.set_transition_time(transition_time),
            ConsoleCommand::Refresh { group } => self.handle(&group)?.refresh(),
            ConsoleCommand::Dump => {
                let yaml = self.bridge.to_yaml().await?;
                tokio::fs::write(&self.state_file, yaml).await?;
                log::info!("Bridge state written to [{}]", self.state_file);
                Ok(())
            }
        }
    }

    async fn run(self) -> ApiResult<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let res = match line.parse::<ConsoleCommand>() {
                Ok(cmd) => self.execute(cmd).await,
                Err(err) => Err(err),
            };

            if let Err(err) = res {
                log::error!("{err}");
            }
        }

        log::info!("End of input, exiting..");
        Ok(())
    }
}

fn spawn_handlers(
    config: &AppConfig,
    bridge: &Arc<MemoryBridge>,
    updates: &broadcast::Sender<ChannelUpdate>,
    tasks: &mut JoinSet<ApiResult<()>>,
) -> BTreeMap<String, GroupHandle> {
    let mut handles = BTreeMap::new();

    for (id, group) in &config.groups {
        let session = CommandSession::new(
            group.mirek_range(&config.defaults),
            group.transition_time(&config.defaults),
        );

        let (handler, handle) =
            GroupHandler::new(id.clone(), bridge.clone(), updates.clone(), session);

        log::info!("Starting handler for group {id} ({})", group.name);
        tasks.spawn(handler.run());
        handles.insert(id.clone(), handle);
    }

    handles
}

async fn run() -> ApiResult<()> {
    init_logging()?;

    let args = Args::parse();

    let config = config::parse(&args.config)?;
    log::debug!("Configuration loaded successfully");

    if !config.has_groups() {
        log::warn!("{}", "-".repeat(80));
        log::warn!("No groups configured in config!");
        log::warn!("{} will run, but cannot control any lights.", config.bridge.name);
        log::warn!("{}", "-".repeat(80));
    }

    let bridge = Arc::new(MemoryBridge::from_config(&config));
    let (updates, updates_rx) = broadcast::channel(UPDATE_CAPACITY);
    tokio::spawn(report_channel_updates(updates_rx));

    let mut tasks = JoinSet::new();
    let handles = spawn_handlers(&config, &bridge, &updates, &mut tasks);
    drop(updates);

    let console = Console {
        bridge,
        handles,
        state_file: config.bridge.state_file.clone(),
    };

    tokio::select! {
        res = console.run() => res?,
        msg = wait_for_shutdown() => {
            log::warn!("{}", msg?);
            let _ = std::io::stderr().flush();
        }
    }

    while let Some(res) = tasks.join_next().await {
        res??;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log::error!("Huebind error: {err}");
        log::error!("Fatal error encountered, cannot continue.");
    }
}
