pub mod board;
pub mod card;
pub mod column;
pub mod controller;
pub mod deadline;
pub mod field_update;
pub mod filter;
pub mod i18n;
pub mod model;
pub mod preferences;
pub mod reminder;
pub mod scheduler;
pub mod statistics;
pub mod tag;
pub mod validation;
pub mod view;

pub use board::Board;
pub use card::{Card, CardId, CardPriority, CardStatus, ChecklistItem};
pub use column::{Column, ColumnId, DEFAULT_COLUMN_COLOR};
pub use controller::{
    ConfirmRequest, Controller, Effect, ExportFile, Intent, Outcome, PendingAction, Toast,
    ToastLevel,
};
pub use deadline::{DeadlineAlert, DeadlineKind};
pub use field_update::{CardUpdate, FieldUpdate, NewCard};
pub use filter::{CardFilter, CompositeFilter, FilterSet};
pub use i18n::Label;
pub use model::{BoardChange, BoardEvent, BoardModel, BoardObserver, BoardStorage, SubscriptionId};
pub use preferences::{Language, NotificationPermission, Theme};
pub use reminder::{Reminder, ReminderStats, ReminderStorage};
pub use scheduler::{CheckReport, Notification, NotificationLevel, NotificationScheduler, Notifier};
pub use statistics::Statistics;
pub use tag::{tag_color, TagColor};
pub use view::{visible_board, BoardView, CardVariant, CardView, ColumnView};
