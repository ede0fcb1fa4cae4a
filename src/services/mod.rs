pub mod likes_service;
pub mod series_service;
pub mod scale_service;
pub mod tick_service;
pub mod layout_service;
pub mod chart_service;
pub mod graph_service;
