pub mod system_order;

pub use system_order::{
    configure_scene_sets, InputSet, LifecycleSet, PresentationSet, RulesSet, SessionSet,
};
