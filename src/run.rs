use ch_app::menu::TRAY_MENU;
use ch_platform::WindowId;
use ch_platform_windows::{UserEventSender, run_app};
use ch_settings::Settings;

use crate::app::App;
use crate::constants::{WINDOW_CLASS_NAME, WINDOW_SIZE, WINDOW_TITLE};
use crate::error::AppResult;
use crate::host_event::HostEvent;

fn create_app(
    window: WindowId,
    settings: &Settings,
    events: UserEventSender<HostEvent>,
) -> AppResult<App> {
    let app = App::new(window, settings, events.clone())?;
    if !settings.start_hidden {
        let _ = events.send(HostEvent::ShowWindow);
    }
    Ok(app)
}

pub fn run(settings: Settings) -> AppResult<()> {
    let (width, height) = WINDOW_SIZE;
    run_app(
        WINDOW_CLASS_NAME,
        WINDOW_TITLE,
        width,
        height,
        TRAY_MENU,
        |window, events| create_app(window, &settings, events),
    )?;
    Ok(())
}
