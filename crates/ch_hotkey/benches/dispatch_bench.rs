//! Hotkey notification fan-out benchmark.
//!
//! Run: `cargo bench -p ch_hotkey --bench dispatch_bench`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ch_hotkey::{
    HotkeyId, HotkeyManager, HotkeyRegistrar, KeyCode, KeyPressedHandler, MessageWindow,
    ModifierSet, OsError, decode_notification,
};
use ch_platform::WindowId;
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

struct AcceptAll;

impl HotkeyRegistrar for AcceptAll {
    fn bind(
        &mut self,
        _: WindowId,
        _: HotkeyId,
        _: ModifierSet,
        _: KeyCode,
    ) -> Result<(), OsError> {
        Ok(())
    }

    fn unbind(&mut self, _: WindowId, _: HotkeyId) -> Result<(), OsError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
struct Slot(Rc<RefCell<Option<KeyPressedHandler>>>);

impl MessageWindow for Slot {
    fn window_id(&self) -> WindowId {
        WindowId::from_raw(1)
    }

    fn set_key_pressed_handler(&mut self, handler: Option<KeyPressedHandler>) {
        *self.0.borrow_mut() = handler;
    }

    fn destroy(&mut self) {}
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("KeyPressed fan-out");

    for subscribers in [1usize, 4, 16] {
        group.bench_with_input(
            BenchmarkId::from_parameter(subscribers),
            &subscribers,
            |b, &subscribers| {
                let slot = Slot::default();
                let manager = HotkeyManager::new(AcceptAll, slot.clone());
                let hits = Rc::new(Cell::new(0u64));
                for _ in 0..subscribers {
                    let hits = Rc::clone(&hits);
                    manager.subscribe(move |_| hits.set(hits.get() + 1));
                }

                b.iter(|| {
                    let event = decode_notification(black_box(1), black_box(0x0056_0008));
                    if let Some(handler) = slot.0.borrow().as_ref() {
                        handler(event);
                    }
                });
                black_box(hits.get());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fan_out);
criterion_main!(benches);
