pub mod device;
pub mod phy;
pub mod transmission;
pub mod ui;
pub mod utils;
