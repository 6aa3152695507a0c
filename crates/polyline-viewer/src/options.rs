use anyhow::{bail, Context};
use polyline_engine::DrawingConfig;

// 원래 stage 크기
const CANVAS_SIZE: f32 = 400.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub config: DrawingConfig,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            config: DrawingConfig::default(),
            canvas_width: CANVAS_SIZE,
            canvas_height: CANVAS_SIZE,
        }
    }
}

impl ViewerOptions {
    /// Parses `--max-points N`, `--history N` and `--line-limit N`.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Self> {
        let mut options = Self::default();
        let mut args = args.into_iter();
        while let Some(flag) = args.next() {
            let mut value = || -> anyhow::Result<usize> {
                let raw = args.next().with_context(|| format!("missing value for {}", flag))?;
                raw.parse()
                    .with_context(|| format!("invalid value for {}: {:?}", flag, raw))
            };
            match flag.as_str() {
                "--max-points" => options.config = options.config.with_max_points(value()?),
                "--history" => options.config = options.config.with_history_limit(Some(value()?)),
                "--line-limit" => options.config = options.config.with_line_limit(Some(value()?)),
                _ => bail!("unknown argument: {}", flag),
            }
        }
        Ok(options)
    }
}
