mod ids;
mod parameter;
mod scaling;

pub use ids::{GroupId, ParamId, VersionId, ZoneId};
pub use parameter::{
    CategoryGroup, CategoryTag, EfficacyPeriod, Inheritance, ParamKind, Parameter, ParameterDef,
    Value, Version, Zone,
};
pub use scaling::{
    ScaleOp, ScalingGroup, ScalingItem, ScalingState, TabConfig, group_number,
};
