mod options;
mod ui;

use eframe::egui;

use crate::options::ViewerOptions;
use crate::ui::root::RootViewState;

struct PolylineApp {
    root: RootViewState,
}

impl eframe::App for PolylineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.root.update(ctx);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let options = ViewerOptions::from_args(std::env::args().skip(1))?;
    log::info!("starting with {:?}", options);

    // 캔버스 + 버튼 줄 + 상태 표시줄
    let window_size = egui::vec2(options.canvas_width + 32.0, options.canvas_height + 96.0);
    let native_options = eframe::NativeOptions {
        initial_window_size: Some(window_size),
        ..Default::default()
    };

    let root = RootViewState::new(&options);
    eframe::run_native(
        "Polyline",
        native_options,
        Box::new(move |_cc| Box::new(PolylineApp { root })),
    );
    Ok(())
}
