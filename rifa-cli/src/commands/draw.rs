use std::io::Write;
use std::sync::Arc;

use rifa_core::{build_checkout_url, event_channel, selection, LotteryApi, LotteryId};
use rifa_draw::DrawController;

pub async fn run_draw(
    base_url: &str,
    lottery_id: LotteryId,
    confirm: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let api = Arc::new(LotteryApi::new(base_url));
    let (events, _rx) = event_channel();
    let store = selection::shared(events.clone());
    let mut controller = DrawController::new(api, lottery_id, events);

    println!("Spinning the lucky draw...");
    let ticket = controller.spin(render_reels).await?;
    println!();
    println!("The draw landed on ticket {}", ticket);

    if confirm {
        controller.confirm(&store)?;
        let url = build_checkout_url(lottery_id, &store.lock())?;
        println!("Checkout: {}/{}", base_url, url);
    } else {
        println!("Re-run with --confirm to take it, or spin again for another number");
    }

    Ok(())
}

pub(crate) fn render_reels(faces: [u8; rifa_draw::REEL_COUNT], _phase: rifa_draw::DrawPhase) {
    print!(
        "\r  [{}] [{}] [{}] [{}]",
        faces[0], faces[1], faces[2], faces[3]
    );
    let _ = std::io::stdout().flush();
}
