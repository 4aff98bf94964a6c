// Grid interaction engine
// Maps pointer and touch gestures onto quarter-hour cell selections

pub mod auto_scroll;
pub mod controller;
pub mod device;
pub mod drag;
pub mod events;
pub mod gesture;
pub mod layout;
pub mod marks;
pub mod range;
pub mod selection;
pub mod swipe;
pub mod tap;

pub use auto_scroll::{AutoScrollConfig, AutoScrollController, ScrollViewport};
pub use controller::{GridHost, GridInteraction};
pub use device::{DeviceDetector, DeviceSignals, InputModality, NoDeviceSignals};
pub use drag::{DragMode, DragPhase, DragSelectionEngine};
pub use events::{EventBus, EventSource, GlobalEvent, ListenerKind, SubscriptionId};
pub use gesture::{PointerInput, PointerKind, Propagation};
pub use layout::{CellHitTest, GridLayout};
pub use marks::CompletedMarks;
pub use range::{is_in_range, CellRange};
pub use selection::{CellSelection, SelectionStore};
