use std::any::{Any, TypeId};

use crate::hashing::{HashMap, HashMapExt};

/// A trait for objects that can provide data containers to be held by `Context`
pub trait DataPlugin: Any {
    type DataContainer;

    fn create_data_container() -> Self::DataContainer;
}

/// Defines a new type for storing data in `Context`.
#[macro_export]
macro_rules! define_data_plugin {
    ($data_plugin:ident, $data_container:ty, $default: expr) => {
        struct $data_plugin;

        impl $crate::context::DataPlugin for $data_plugin {
            type DataContainer = $data_container;

            fn create_data_container() -> Self::DataContainer {
                $default
            }
        }
    };
}
pub use define_data_plugin;

/// The simulation context. Owns every module's data container and the
/// current tick counter. All simulation functionality is attached through
/// extension traits implemented for `Context`, so a fresh instance carries
/// no state until the modules that need it are initialized.
pub struct Context {
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
    current_tick: u64,
}

impl Context {
    #[must_use]
    pub fn new() -> Context {
        Context {
            data_plugins: HashMap::new(),
            current_tick: 0,
        }
    }

    fn add_plugin<T: DataPlugin>(&mut self) {
        self.data_plugins
            .insert(TypeId::of::<T>(), Box::new(T::create_data_container()));
    }

    /// Returns a mutable reference to the data container associated with the
    /// plugin, creating it with the plugin's default if it does not exist yet.
    pub fn get_data_container_mut<T: DataPlugin>(&mut self, _data_plugin: T) -> &mut T::DataContainer {
        let type_id = &TypeId::of::<T>();
        if !self.data_plugins.contains_key(type_id) {
            self.add_plugin::<T>();
        }
        self.data_plugins
            .get_mut(type_id)
            .unwrap()
            .downcast_mut::<T::DataContainer>()
            .unwrap()
    }

    /// Returns a reference to the data container associated with the plugin,
    /// or `None` if the container has never been created.
    pub fn get_data_container<T: DataPlugin>(&self, _data_plugin: T) -> Option<&T::DataContainer> {
        let type_id = &TypeId::of::<T>();
        if !self.data_plugins.contains_key(type_id) {
            return None;
        }
        self.data_plugins
            .get(type_id)
            .unwrap()
            .downcast_ref::<T::DataContainer>()
    }

    /// The number of completed simulation ticks.
    #[must_use]
    pub fn get_current_tick(&self) -> u64 {
        self.current_tick
    }

    pub(crate) fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
