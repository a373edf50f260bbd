pub mod data;
pub mod ordinal;
pub mod primitives;
pub mod scale;
pub mod types;

pub use data::{
    AggregatedData, AggregatedDataPatch, KeyRecord, KeyValue, LEFT_AXIS_GROUP, RIGHT_AXIS_GROUP,
    SeriesPoint, SeriesRecord,
};
pub use ordinal::{ColorScale, LineStyle, OrdinalScale, StyleScale};
pub use scale::{BandScale, LinearScale, Scale, ScaleDomain, ScaleKind, TimeScale};
pub use types::{
    AUTO_DOMAIN_TOKEN, ChartType, DomainKey, DomainOverride, DomainValue, KeyType, Margin,
};
