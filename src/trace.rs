use tracing::Level;
use tracing_subscriber::fmt::fmt;

pub fn init(level: Level, timestamp: bool) {
    let base = fmt().with_max_level(level).with_file(false);

    if timestamp {
        base.init()
    } else {
        base.without_time().init()
    }
}
