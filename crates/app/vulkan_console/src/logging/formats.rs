use std::io::Write;

use flexi_logger::{DeferredNow, TS_DASHES_BLANK_COLONS_DOT_BLANK};
use log::Record;

/// `<timestamp> <LEVEL> [<module>] <message>`
pub fn cli_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {:<5} [{}] {}",
        now.format(TS_DASHES_BLANK_COLONS_DOT_BLANK),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}
