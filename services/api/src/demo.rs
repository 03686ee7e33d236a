use crate::infra::{cli_settings_path, DeviceStore};
use clap::{Args, Subcommand};
use kisan_audit::audit::{AuditInput, GradientTransmitter, LocalAuditEngine, LoggingTransmitter};
use kisan_audit::config::AppConfig;
use kisan_audit::error::AppError;
use kisan_audit::settings::{AppSettings, MemoryStore, SettingsPatch, SettingsSync};
use kisan_audit::telemetry;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct AuditArgs {
    /// Annual household income in rupees (treated as 0 when omitted)
    #[arg(long)]
    pub(crate) income: Option<f64>,
    /// Landholding in acres (treated as 0 when omitted)
    #[arg(long)]
    pub(crate) land_size: Option<f64>,
    /// Hand the audit off to the simulated gradient transmitter under this id
    #[arg(long)]
    pub(crate) transmit: Option<String>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum SettingsCommand {
    /// Print the persisted settings
    Show(SettingsLocation),
    /// Merge the given values into the persisted settings
    Set(SettingsSetArgs),
    /// Restore the default settings
    Reset(SettingsLocation),
}

#[derive(Args, Debug, Default)]
pub(crate) struct SettingsLocation {
    /// Settings file (defaults to APP_SETTINGS_PATH, then ./kisan-settings.json)
    #[arg(long)]
    pub(crate) path: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SettingsSetArgs {
    #[command(flatten)]
    pub(crate) location: SettingsLocation,
    /// Interface language code, e.g. hi, mr, ta
    #[arg(long)]
    pub(crate) language: Option<String>,
    /// Enable or disable voice guidance
    #[arg(long)]
    pub(crate) voice_enabled: Option<bool>,
    /// Enable or disable notifications
    #[arg(long)]
    pub(crate) notifications: Option<bool>,
    /// Enable or disable automatic translation
    #[arg(long)]
    pub(crate) auto_translate: Option<bool>,
}

impl SettingsSetArgs {
    fn patch(&self) -> SettingsPatch {
        SettingsPatch {
            language: self.language.clone(),
            voice_enabled: self.voice_enabled,
            notifications: self.notifications,
            auto_translate: self.auto_translate,
        }
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit tracing output while the demo runs
    #[arg(long)]
    pub(crate) verbose: bool,
}

pub(crate) fn run_audit(args: AuditArgs) -> Result<(), AppError> {
    let AuditArgs {
        income,
        land_size,
        transmit,
    } = args;

    let engine = LocalAuditEngine::default();
    let result = engine.evaluate(&AuditInput { income, land_size });
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(audit_id) = transmit {
        let receipt = LoggingTransmitter.transmit(&audit_id);
        println!("{}", serde_json::to_string_pretty(&receipt)?);
    }

    Ok(())
}

pub(crate) fn run_settings(command: SettingsCommand) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let settings = match command {
        SettingsCommand::Show(location) => open_settings(location, &config).current(),
        SettingsCommand::Set(args) => {
            let patch = args.patch();
            open_settings(args.location, &config).update(patch)?
        }
        SettingsCommand::Reset(location) => open_settings(location, &config).reset()?,
    };

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

fn open_settings(location: SettingsLocation, config: &AppConfig) -> SettingsSync<DeviceStore> {
    let path = cli_settings_path(location.path, &config.storage);
    SettingsSync::open(Arc::new(DeviceStore::file(path)))
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    if args.verbose {
        let config = AppConfig::load()?;
        telemetry::init(&config.telemetry)?;
    }

    println!("Local eligibility audit demo");
    let engine = LocalAuditEngine::default();
    let applicants = [
        ("marginal farmer", AuditInput::new(180_000.0, 2.0)),
        ("salaried smallholder", AuditInput::new(300_000.0, 3.0)),
        ("large landholder", AuditInput::new(650_000.0, 12.0)),
        ("no declared attributes", AuditInput::default()),
    ];

    for (index, (label, input)) in applicants.iter().enumerate() {
        let result = engine.evaluate(input);
        println!("- {label}: {}", result.summary());

        if result.is_eligible {
            let receipt = LoggingTransmitter.transmit(&format!("demo-{:03}", index + 1));
            println!("  gradient hand-off {} ({:?})", receipt.audit_id, receipt.status);
        }
    }

    println!("\nSettings synchronization demo (in-memory store)");
    let sync = Arc::new(SettingsSync::open(Arc::new(MemoryStore::new())));
    let notifications = Arc::new(AtomicUsize::new(0));

    for screen in ["voice assistant", "profile header"] {
        let counter = notifications.clone();
        let observer = Arc::downgrade(&sync);
        sync.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            if let Some(sync) = observer.upgrade() {
                println!("  [{screen}] re-read language={}", sync.load().language);
            }
        });
    }

    print_settings("initial", &sync.current());
    let updated = sync.update(SettingsPatch {
        language: Some("mr".to_string()),
        voice_enabled: Some(false),
        ..SettingsPatch::default()
    })?;
    print_settings("after update", &updated);
    let reset = sync.reset()?;
    print_settings("after reset", &reset);
    println!(
        "- {} listener notifications delivered",
        notifications.load(Ordering::SeqCst)
    );

    Ok(())
}

fn print_settings(label: &str, settings: &AppSettings) {
    println!(
        "- {label}: language={} voice={} notifications={} auto_translate={}",
        settings.language, settings.voice_enabled, settings.notifications, settings.auto_translate
    );
}
