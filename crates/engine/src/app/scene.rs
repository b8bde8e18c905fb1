use super::assets::{ImageLoader, ResourceError};
use super::registry::EntityRegistry;

pub trait Scene {
    fn load(
        &mut self,
        registry: &mut EntityRegistry,
        images: &mut dyn ImageLoader,
    ) -> Result<(), ResourceError>;

    fn unload(&mut self, _registry: &mut EntityRegistry) {}
}

pub fn load_scene(
    scene: &mut dyn Scene,
    registry: &mut EntityRegistry,
    images: &mut dyn ImageLoader,
) -> Result<(), ResourceError> {
    scene.load(registry, images)?;
    registry.apply_pending();
    Ok(())
}
