//! Windowed abilities: the hurtbox collects targets between activation and
//! cast end, then deals batched damage.

mod common;

use ashen_horde::combat::{AbilityId, CastController, HurtBox};
use ashen_horde::player::PlayerCommand;
use bevy::prelude::*;
use common::*;

fn place(app: &mut App, entity: Entity, position: Vec3) {
    app.world_mut().get_mut::<Transform>(entity).unwrap().translation = position;
}

#[test]
fn two_hand_slash_damages_only_new_entrants_once() {
    let mut app = app_with(quiet_config(), 8);
    let player = add_player(&mut app, Vec3::ZERO);
    let inside_at_open = add_dummy(&mut app, Vec3::new(0.0, 0.0, -1.0), 100.0);
    let late_arrival = add_dummy(&mut app, Vec3::new(0.0, 0.0, -6.0), 100.0);

    app.world_mut().send_event(PlayerCommand::Cast {
        ability: AbilityId::TwoHandSlash,
        target_point: Vec3::new(0.0, 0.0, -5.0),
    });
    app.update();

    advance_to(&mut app, 1.2);
    let hurtbox = app.world().get::<HurtBox>(player).unwrap();
    assert!(hurtbox.enabled, "hurtbox opens at 0.9s");
    assert_eq!(hurtbox.pending(), 0, "entities inside at open are ignored");

    // Enter, leave and enter again while the box is open
    place(&mut app, late_arrival, Vec3::new(0.0, 0.0, -1.2));
    advance_to(&mut app, 1.8);
    place(&mut app, late_arrival, Vec3::new(0.0, 0.0, -6.0));
    advance_to(&mut app, 2.2);
    place(&mut app, late_arrival, Vec3::new(0.0, 0.0, -1.2));
    advance_to(&mut app, 2.6);
    assert_eq!(app.world().get::<HurtBox>(player).unwrap().pending(), 1);
    assert_eq!(health(&app, late_arrival), 100.0, "damage waits for cast end");

    // Cast ends at 3.25s
    advance_to(&mut app, 3.5);
    assert_eq!(health(&app, late_arrival), 40.0);
    assert_eq!(health(&app, inside_at_open), 100.0);

    let hurtbox = app.world().get::<HurtBox>(player).unwrap();
    assert!(!hurtbox.enabled);
    assert_eq!(hurtbox.size, HurtBox::BASELINE);
}

#[test]
fn slide_attack_uses_its_own_window_and_multiplier() {
    let mut app = app_with(quiet_config(), 9);
    let player = add_player(&mut app, Vec3::ZERO);
    let target = add_dummy(&mut app, Vec3::new(0.0, 0.0, -6.0), 100.0);

    app.world_mut().send_event(PlayerCommand::Cast {
        ability: AbilityId::SlideAttack,
        target_point: Vec3::new(0.0, 0.0, -5.0),
    });
    app.update();

    advance_to(&mut app, 1.0);
    assert!(app.world().get::<HurtBox>(player).unwrap().enabled);
    place(&mut app, target, Vec3::new(0.0, 0.0, -1.0));

    advance_to(&mut app, 2.3);
    assert_eq!(health(&app, target), 100.0);

    // Cast ends at 2.5s: 1.0 x 40 damage
    advance_to(&mut app, 2.7);
    assert_eq!(health(&app, target), 60.0);
}

#[test]
fn window_spanned_by_a_single_tick_still_collects() {
    let mut config = quiet_config();
    // 0.05s casts: the whole TwoHandSlash window fits inside one 0.25s tick
    config.player.attacks_per_second = 20.0;

    let mut app = app_at_rate(config, 11, 4.0);
    let player = add_player(&mut app, Vec3::ZERO);
    // Outside the baseline box, inside the grown one
    let target = add_dummy(&mut app, Vec3::new(0.0, 0.0, -1.8), 100.0);

    app.world_mut().send_event(PlayerCommand::Cast {
        ability: AbilityId::TwoHandSlash,
        target_point: Vec3::new(0.0, 0.0, -5.0),
    });
    app.update();
    assert!(app.world().get::<CastController>(player).unwrap().is_casting());

    app.update();
    assert!(!app.world().get::<CastController>(player).unwrap().is_casting());
    assert_eq!(health(&app, target), 40.0);
    assert!(!app.world().get::<HurtBox>(player).unwrap().enabled);
}
