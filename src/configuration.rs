use std::cell::{
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::manager::manager::{
    IManager,
    Manager
};
use crate::manager::managererror::ManagerError;
use crate::math::curve::tabulatedcurve::tabulatedcurve::TabulatedCurve;
use crate::math::curve::tabulatedcurve::tabulatedcurvemanager::new_tabulated_curve_manager;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    tabulated_curve: Vec<serde_json::Value>
}

pub struct Configuration {
    tabulated_curve_manager_cell: RefCell<Manager<Box<dyn TabulatedCurve>>>
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration {
            tabulated_curve_manager_cell: RefCell::new(new_tabulated_curve_manager())
        }
    }

    pub fn tabulated_curve_manager(&self) -> RefMut<'_, Manager<Box<dyn TabulatedCurve>>> {
        self.tabulated_curve_manager_cell.borrow_mut()
    }

    /// Loads `{"tabulated_curve": [...]}` from a JSON file.
    pub fn from_reader(&self, file_path: &Path) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        self.load(BufReader::new(file))?;
        info!(path = %file_path.display(), "configuration loaded");
        Ok(())
    }

    pub fn load<R: Read>(&self, reader: R) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        let manager = self.tabulated_curve_manager();
        manager.insert_obj_from_json_vec(&json_prop.tabulated_curve)?;
        info!(curves = json_prop.tabulated_curve.len(), "tabulated curves registered");
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::new()
    }
}
