use log::{Level, LevelFilter};

/// Parse a level name (`off`, `error`, ..., `trace`); unknown names fall back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    level.parse().unwrap_or(LevelFilter::Info)
}

/// Route `log` records to the browser console. Calling it again only changes the level.
pub fn install(level: LevelFilter) {
    if let Some(level) = console_level(level) {
        if console_log::init_with_level(level).is_err() {
            log::debug!("console logger already installed");
        }
    }
    log::set_max_level(level);
}

/// The most verbose level that still passes `filter`, if any.
pub fn console_level(filter: LevelFilter) -> Option<Level> {
    filter.to_level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("OFF"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn off_has_no_console_level() {
        assert_eq!(console_level(parse_level("off")), None);
        assert_eq!(console_level(parse_level("warn")), Some(Level::Warn));
    }
}
