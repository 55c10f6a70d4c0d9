use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::render::context::MeasureContext;

struct TextStub;

#[async_trait::async_trait]
impl LayerPlugin for TextStub {
    fn kind(&self) -> LayerKind {
        LayerKind::Text
    }

    fn draw(
        &self,
        _ctx: &mut dyn DrawContext,
        _options: &serde_json::Value,
        _computed: Option<&ComputedResult>,
    ) -> LayerkitResult<()> {
        Ok(())
    }
}

#[test]
fn builtin_registers_fill_and_image_only() {
    let reg = PluginRegistry::builtin();
    assert!(reg.get(LayerKind::Fill).is_ok());
    assert!(reg.get(LayerKind::Image).is_ok());
    let err = reg.get(LayerKind::Text).err().unwrap();
    assert!(matches!(err, LayerkitError::UnknownKind(ref k) if k == "text"));
}

#[test]
fn with_plugin_adds_a_kind() {
    let reg = PluginRegistry::builtin().with_plugin(Arc::new(TextStub));
    assert!(reg.contains(LayerKind::Text));
    let plugin = reg.get(LayerKind::Text).unwrap();
    assert!(!plugin.has_compute());
    let ctx = MeasureContext::new(Default::default());
    assert!(plugin.bbox(&ctx, &serde_json::json!({}), None).is_none());
}

#[tokio::test]
async fn default_compute_fails() {
    let err = TextStub.compute(&serde_json::json!({})).await.unwrap_err();
    assert!(matches!(err, LayerkitError::Compute { .. }));
}

#[tokio::test]
async fn sync_cleanup_runs_once_with_the_artifact() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let result = ComputedResult::new(7u32).with_cleanup(move |c| {
        assert_eq!(c.downcast_ref::<u32>(), Some(&7));
        seen.fetch_add(1, Ordering::SeqCst);
    });
    assert!(result.has_cleanup());
    assert_eq!(result.downcast::<u32>(), Some(&7));
    result.run_cleanup().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn async_cleanup_is_awaited() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let result = ComputedResult::new("x").with_async_cleanup(move |_| async move {
        tokio::task::yield_now().await;
        seen.fetch_add(1, Ordering::SeqCst);
    });
    result.run_cleanup().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
