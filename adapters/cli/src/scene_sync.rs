use wave_survivor_core::EndCause;
use wave_survivor_rendering::{
    AmmoCounter, BulletPresentation, EnemyPresentation, HealthBar, PlayerPresentation, Scene,
    SessionTimer, WaveBanner,
};
use wave_survivor_session::Session;
use wave_survivor_world::query;

/// Copies the session state the HUD and sprites depend on into `scene`.
pub(crate) fn sync(session: &Session, scene: &mut Scene) {
    let world = session.world();
    let config = session.config();

    let player = query::player(world);
    scene.player = PlayerPresentation::from_snapshot(&player, config.player_radius);

    scene.enemies.clear();
    scene.enemies.extend(
        query::enemy_view(world)
            .iter()
            .map(|enemy| EnemyPresentation::from_snapshot(enemy, config.enemy_radius)),
    );
    scene.bullets.clear();
    scene.bullets.extend(
        query::bullet_view(world)
            .iter()
            .map(|bullet| BulletPresentation::from_snapshot(bullet, config.bullet_radius)),
    );

    let hud = &mut scene.hud;
    hud.health = HealthBar::new(player.health, player.max_health);
    hud.ammo = AmmoCounter {
        remaining: query::ammo_remaining(world),
    };
    hud.timer = SessionTimer {
        elapsed: query::elapsed(world),
    };
    hud.banner = query::announcement(world)
        .map(|(wave, shown_for)| WaveBanner::new(wave, shown_for, config.wave_announce()));
    hud.game_over = session.game_over().map(|signal| {
        let reason = match signal.cause {
            EndCause::PlayerDefeated => "defeated",
            EndCause::AmmoExhausted => "out of bullets",
        };
        format!("GAME OVER: {reason} (R to restart)")
    });
}
