use anyhow::Context;
use maestro_testing::{TestHost, ViewId, DEFAULT_MAX_PASSES};
use maestro_ui::{
    mutable_state_of, Alignment, CoordinateSpace, Extent, FrameBehavior, GeometryObserver,
    GroupKey, Modifier, Size, SizeRegistry,
};

const GROUP: &str = "buttons";

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Maestro equal-width demo ===");
    println!("Three buttons of different natural widths share the group {GROUP:?}.");
    println!("Set RUST_LOG=trace to watch every proposal and registry write.");
    println!();

    let registry = SizeRegistry::shared();
    let mut host = TestHost::new(Size::new(720.0, 64.0)).with_spacing(12.0);

    let row_size = mutable_state_of(Size::ZERO);
    let caption = GeometryObserver::new()
        .with_coordinate_space(CoordinateSpace::Global)
        .with_behavior(FrameBehavior::Fill)
        .with_alignment(Alignment::CENTER_END);

    let buttons: Vec<(&str, ViewId)> = [("Cancel", 96.0), ("Save draft", 148.0), ("Publish", 112.0)]
        .into_iter()
        .map(|(label, width)| {
            let modifier = Modifier::empty()
                .equal_widths(Extent::Greatest, GROUP)
                .measure_containing_view(&row_size);
            (label, host.add_view(Size::new(width, 40.0), modifier))
        })
        .collect();
    host.add_view(Size::new(80.0, 20.0), Modifier::empty().read_size(&caption));

    let passes = host
        .run_until_idle(DEFAULT_MAX_PASSES)
        .context("equal-width row")?;
    log::info!("row settled after {passes} passes");

    for (label, id) in &buttons {
        let rendered = host.rendered_size(*id)?;
        let measured = host.measured_size(*id)?;
        println!(
            "{label:>12}: natural {:>6.1} -> rendered {:>6.1}",
            measured.width, rendered.width
        );
    }
    println!(
        "group width: {}",
        registry.get(GroupKey::new(GROUP)).width
    );
    println!("row size:    {:?}", row_size.get());
    println!(
        "caption:     {:?} (x {}..{})",
        caption.size(),
        caption.min_x(),
        caption.max_x()
    );
    Ok(())
}
