use nla_proxy::{AnimationManager, Document, HostError, TweakModeHost};

fn load(name: &str) -> Document {
    nla_test_fixtures::scenes::load(name).expect("load scene")
}

#[test]
fn no_animation_data_round_trips_as_nothing() {
    let mut doc = load("no-animation");
    let prop = doc.find_object("Prop").unwrap();
    let fresh = doc.find_object("Fresh").unwrap();

    let mut manager = AnimationManager::new();
    manager.save_animation_data(&doc, prop).unwrap();
    assert!(!manager.has_animation_data());
    assert!(manager.record().is_none());
    manager.clear_animation_data(&mut doc, prop).unwrap();
    manager.set_animation_data(&mut doc, fresh, true).unwrap();

    assert!(doc.object(fresh).unwrap().animation_data().is_none());
    assert!(doc.object(prop).unwrap().animation_data().is_none());
}

#[test]
fn strip_without_action_is_dropped() {
    let mut doc = load("orphan-strip");
    let crowd = doc.find_object("Crowd").unwrap();

    let mut manager = AnimationManager::new();
    manager.save_animation_data(&doc, crowd).unwrap();
    let saved = manager.record().unwrap().nla_tracks.tracks.as_ref().unwrap();
    assert_eq!(saved[0].strips.len(), 3);

    manager.clear_animation_data(&mut doc, crowd).unwrap();
    manager.set_animation_data(&mut doc, crowd, true).unwrap();

    let anim = doc.object(crowd).unwrap().animation_data().unwrap();
    let track = anim.nla_tracks.get(0).unwrap();
    let names: Vec<&str> = track.strips().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["A", "B"]);
    let b = track.strips().get(1).unwrap();
    assert!(b.mute());
    assert_eq!(b.frame_start(), 40.0);
    assert_eq!(b.frame_end(), 50.0);
}

#[test]
fn tweak_mode_is_off_during_restore_and_back_on_after() {
    let mut doc = load("hero-nla");
    let hero = doc.find_object("Hero").unwrap();
    let mut manager = AnimationManager::new();
    manager.save_animation_data(&doc, hero).unwrap();

    doc.enter_tweak_mode();
    // structural edits are refused while tweaking
    assert_eq!(doc.edit(hero).unwrap_err(), HostError::TweakModeActive);

    manager.set_animation_data(&mut doc, hero, true).unwrap();
    assert!(doc.is_tweak_mode());
    let anim = doc.object(hero).unwrap().animation_data().unwrap();
    assert_eq!(anim.nla_tracks.len(), 2);
}

#[test]
fn inactive_tweak_mode_stays_inactive() {
    let mut doc = load("hero-nla");
    let hero = doc.find_object("Hero").unwrap();
    let mut manager = AnimationManager::new();
    manager.save_animation_data(&doc, hero).unwrap();
    manager.set_animation_data(&mut doc, hero, true).unwrap();
    assert!(!doc.is_tweak_mode());
}

#[test]
fn failed_restore_still_re_enters_tweak_mode() {
    let source = load("hero-nla");
    let hero = source.find_object("Hero").unwrap();
    let mut manager = AnimationManager::new();
    manager.save_animation_data(&source, hero).unwrap();

    // a document that lacks the saved actions
    let mut target = load("no-animation");
    let fresh = target.find_object("Fresh").unwrap();
    target.enter_tweak_mode();

    let err = manager.set_animation_data(&mut target, fresh, true).unwrap_err();
    assert!(matches!(err, HostError::ActionNotFound(_)));
    assert!(target.is_tweak_mode());
}
