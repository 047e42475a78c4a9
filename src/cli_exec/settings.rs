use parking_lot::Mutex;

use clipwatch::control::{ControlStateStore, SettingsRemote, SettingsSync};
use clipwatch::events::EventSink;
use clipwatch::model::SettingValue;

use crate::cli_commands::settings::Toggle;

use super::*;

pub(super) fn handle_settings_command(
    client: Arc<RemoteClient>,
    command: SettingsCommands,
) -> Result<()> {
    let (events, _rx) = EventSink::channel();
    let remote: Arc<dyn SettingsRemote> = client;
    let sync = SettingsSync::new(
        Arc::new(Mutex::new(ControlStateStore::new())),
        remote,
        events,
    );

    let value = match command {
        SettingsCommands::Show { json } => {
            let settings = sync.load()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&settings).context("serialize settings json")?
                );
            } else {
                println!("armed: {}", settings.armed);
                println!("sensitivity: {}", settings.sensitivity);
                println!("notification: {}", settings.notification);
            }
            return Ok(());
        }
        SettingsCommands::Arm => SettingValue::Armed(true),
        SettingsCommands::Disarm => SettingValue::Armed(false),
        SettingsCommands::Sensitivity { level } => SettingValue::Sensitivity(level),
        SettingsCommands::Notify { state } => SettingValue::Notification(Toggle::enabled(state)),
    };

    sync.request_change(value).wait()?;
    println!("{}: {}", value.setting(), value);
    Ok(())
}
