/// UI layer: the chrome (top bar, sidebar) plus one view per stage.

pub mod explore;
pub mod heatmap;
pub mod inference;
pub mod load;
pub mod panels;
pub mod table;
