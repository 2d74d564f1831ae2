use std::ffi::c_void;
use std::fmt;
use std::sync::mpsc;

use ch_platform::{InputEvent, WindowId, WindowMessageHandler};
use tracing::{debug, error};
use windows::Win32::UI::WindowsAndMessaging::{CREATESTRUCTW, WM_APP};

use crate::EventConverter;
use crate::message_box;
use crate::tray_manager::{TRAY_CALLBACK_MESSAGE, tray_event_from_callback};
use crate::win_api;
use crate::win32::{HWND, LPARAM, LRESULT, WM_CLOSE, WM_CREATE, WM_DESTROY, WPARAM};
use crate::window_event_converter::WindowEventConverter;

const USER_EVENT_MESSAGE: u32 = WM_APP + 42;
const EXIT_REQUEST_MESSAGE: u32 = WM_APP + 43;

/// Delivers user events onto the window thread from any thread.
pub struct UserEventSender<E> {
    /// Opaque window id (avoids `HWND` being !Send while still allowing PostMessage from any thread).
    window: WindowId,
    sender: mpsc::Sender<E>,
}

impl<E> Clone for UserEventSender<E> {
    fn clone(&self) -> Self {
        Self {
            window: self.window,
            sender: self.sender.clone(),
        }
    }
}

impl<E> UserEventSender<E> {
    pub fn send(&self, event: E) -> Result<(), mpsc::SendError<E>> {
        self.sender.send(event)?;
        let _ = win_api::post_message(crate::hwnd(self.window), USER_EVENT_MESSAGE, 0, 0);
        Ok(())
    }
}

/// Ask the runner to destroy `window` once the current message has been handled.
pub fn request_exit(window: WindowId) {
    let _ = win_api::post_message(crate::hwnd(window), EXIT_REQUEST_MESSAGE, 0, 0);
}

/// `(command id, label)` pairs for the tray context menu; id `0` is a separator.
pub type TrayMenu = &'static [(u32, &'static str)];

struct CreateParams<F, E> {
    factory: Option<F>,
    tray_menu: TrayMenu,
    user_events: Option<mpsc::Receiver<E>>,
    user_event_sender: mpsc::Sender<E>,
}

struct AppState<A, E> {
    app: A,
    tray_menu: TrayMenu,
    user_events: mpsc::Receiver<E>,
}

/// Create the app window, build the app inside its `WM_CREATE`, and run the message loop until
/// the window is destroyed.
///
/// The window starts hidden; the app decides when to show it.
pub fn run_app<A, F, E>(
    window_class_name: &str,
    title: &str,
    width: i32,
    height: i32,
    tray_menu: TrayMenu,
    create_app: F,
) -> windows::core::Result<()>
where
    A: WindowMessageHandler<WindowHandle = WindowId> + 'static,
    F: FnOnce(WindowId, UserEventSender<A::UserEvent>) -> std::result::Result<A, E>,
    E: fmt::Display,
{
    let _ = win_api::set_process_per_monitor_dpi_aware();

    let (tx, rx) = mpsc::channel::<A::UserEvent>();

    let mut create_params = CreateParams {
        factory: Some(create_app),
        tray_menu,
        user_events: Some(rx),
        user_event_sender: tx,
    };

    let _hwnd = win_api::create_app_window_with_params(
        window_class_name,
        title,
        window_proc::<A, F, E>,
        width,
        height,
        Some(
            (&mut create_params as *mut CreateParams<F, A::UserEvent>).cast::<c_void>()
                as *const c_void,
        ),
    )?;

    win_api::run_message_loop();
    debug!("message loop finished");
    Ok(())
}

fn app_state<'a, A, E>(hwnd: HWND) -> Option<&'a mut AppState<A, E>> {
    let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, E>;
    // SAFETY: set from `Box::into_raw` in WM_CREATE and cleared in WM_DESTROY.
    unsafe { ptr.as_mut() }
}

unsafe extern "system" fn window_proc<A, F, E>(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT
where
    A: WindowMessageHandler<WindowHandle = WindowId> + 'static,
    F: FnOnce(WindowId, UserEventSender<A::UserEvent>) -> std::result::Result<A, E>,
    E: fmt::Display,
{
    let window = crate::window_id(hwnd);

    match msg {
        WM_CREATE => {
            let create_struct = unsafe { &*(lparam.0 as *const CREATESTRUCTW) };
            let create_params = create_struct.lpCreateParams as *mut CreateParams<F, A::UserEvent>;

            if create_params.is_null() {
                return LRESULT(-1);
            }

            let Some(factory) = (unsafe { (&mut *create_params).factory.take() }) else {
                return LRESULT(-1);
            };
            let Some(user_events) = (unsafe { (&mut *create_params).user_events.take() }) else {
                return LRESULT(-1);
            };

            let event_sender = UserEventSender {
                window,
                sender: unsafe { (&mut *create_params).user_event_sender.clone() },
            };

            match factory(window, event_sender) {
                Ok(app) => {
                    let state = Box::new(AppState {
                        app,
                        tray_menu: unsafe { (*create_params).tray_menu },
                        user_events,
                    });
                    win_api::set_window_user_data(hwnd, Box::into_raw(state) as isize);
                    LRESULT(0)
                }
                Err(e) => {
                    error!("app initialization failed: {e}");
                    let msg = format!("Initialization failed: {e}");
                    message_box::show_error(Some(hwnd), "Startup error", &msg);
                    LRESULT(-1)
                }
            }
        }

        WM_DESTROY => {
            let ptr = win_api::get_window_user_data(hwnd) as *mut AppState<A, A::UserEvent>;
            if !ptr.is_null() {
                let mut state = unsafe { Box::from_raw(ptr) };
                win_api::set_window_user_data(hwnd, 0);
                state.app.handle_destroy(window);
            }

            win_api::quit_message_loop(0);
            LRESULT(0)
        }

        val if val == USER_EVENT_MESSAGE => {
            let Some(state) = app_state::<A, A::UserEvent>(hwnd) else {
                return LRESULT(0);
            };

            while let Ok(event) = state.user_events.try_recv() {
                let _ = state.app.handle_user_event(window, event);
            }

            LRESULT(0)
        }

        val if val == EXIT_REQUEST_MESSAGE => {
            let _ = win_api::destroy_window(hwnd);
            LRESULT(0)
        }

        WM_CLOSE => {
            if let Some(state) = app_state::<A, A::UserEvent>(hwnd)
                && let Some(result) = state.app.handle_close_requested(window)
            {
                return LRESULT(result);
            }

            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }

        val if val == TRAY_CALLBACK_MESSAGE => {
            let Some(tray_menu) = app_state::<A, A::UserEvent>(hwnd).map(|s| s.tray_menu) else {
                return LRESULT(0);
            };
            // The context menu runs a modal loop; don't hold the app across it.
            let Some(tray_event) = tray_event_from_callback(hwnd, lparam.0 as u32, tray_menu)
            else {
                return LRESULT(0);
            };

            if let Some(state) = app_state::<A, A::UserEvent>(hwnd)
                && let Some(result) = state
                    .app
                    .handle_input_event(window, InputEvent::Tray(tray_event))
            {
                return LRESULT(result);
            }

            LRESULT(0)
        }

        _ => {
            if let Some(state) = app_state::<A, A::UserEvent>(hwnd) {
                if let Some(event) = WindowEventConverter::convert(msg, wparam, lparam)
                    && let Some(result) = state.app.handle_window_event(window, event)
                {
                    return LRESULT(result);
                }

                if let Some(event) = EventConverter::convert(msg, wparam, lparam)
                    && let Some(result) = state.app.handle_input_event(window, event)
                {
                    return LRESULT(result);
                }
            }

            win_api::def_window_proc(hwnd, msg, wparam, lparam)
        }
    }
}
