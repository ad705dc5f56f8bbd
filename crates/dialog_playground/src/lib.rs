pub mod page;
pub mod playground;
pub mod script;

pub use page::DialogKind;
pub use playground::{Playground, StepReport};
pub use script::{parse_script, Command, ScriptError};

/// Walks through nested dialogs: wrap-around, marker focus, a sticky dialog and focus return.
pub const DEFAULT_SCRIPT: &str = "\
open-a
shift+tab
tab
open-b
tab
click-outside
escape
click-outside
";
