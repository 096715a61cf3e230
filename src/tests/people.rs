//! Person test cases.
//!
//! The last two registered functions fail on purpose so a run shows what
//! diagnostics look like.

use std::any::Any;
use std::rc::Rc;

use slimtest::{
    assert_equal, assert_greater_than, assert_greater_than_or_equal, assert_less_than,
    assert_less_than_or_equal, assert_not_equal, assert_not_null, assert_null, assert_true,
    def_test, register_tests, test_case,
};

use crate::person::{OldPerson, Person, YoungPerson};

test_case! {
    let pete = Person::new("Pete", 24, 180.0);
    let joe = Person::new("Joe", 25, 199.5);

    assert_not_equal!(pete, joe);
}

test_case! {
    let pete1 = Person::new("Pete", 24, 180.0);
    let pete2 = Person::new("Pete", 24, 180.0);

    assert_equal!(pete1, pete2);
    assert_equal!(pete1, pete1);
    assert_equal!(pete2, pete2);

    assert_true!(pete1 == pete2);
}

#[def_test]
fn display_lists_name_age_weight() {
    let pete = Person::new("Pete", 24, 180.0);

    assert_equal!(pete.to_string(), "Pete 24 180");
}

#[def_test]
fn old_age_is_capped() {
    let pete = OldPerson::new("Pete", 400, 180.0);

    assert_greater_than_or_equal!(pete.age(), 0);
    assert_less_than!(pete.age(), 200);
}

#[def_test]
fn young_age_is_capped() {
    let pete = YoungPerson::new("Pete", 400, 180.0);

    assert_greater_than_or_equal!(pete.age(), 0);
    assert_less_than_or_equal!(pete.age(), 30);
}

#[def_test(name = "setters_reverify_age")]
fn setters_keep_band() {
    let mut pete = OldPerson::new("Pete", 70, 80.0);
    pete.set_name("Peter");
    pete.set_weight(82.5);
    pete.set_age(12);

    assert_equal!(pete.name(), "Peter");
    assert_equal!(pete.weight(), 82.5);
    assert_equal!(pete.age(), 65);

    let mut plain = Person::from(pete);
    plain.set_age(12);
    assert_equal!(plain.age(), 12);
}

#[def_test]
fn downcast_to_other_band_is_null() {
    let young: Rc<dyn Any> = Rc::new(YoungPerson::new("Pete", 200, 300.0));
    let as_old: Option<Rc<OldPerson>> = young.clone().downcast::<OldPerson>().ok();

    assert_not_null!(Rc::downgrade(&young));
    assert_null!(as_old);
}

fn young_is_less_than_old() {
    let young_guy = YoungPerson::new("Pete", 23, 400.0);
    let old_dude = OldPerson::new("Pete", 23, 400.0);

    assert_true!(young_guy < old_dude);
    assert_true!(old_dude > young_guy);
    assert_less_than!(young_guy, old_dude);
    assert_greater_than!(old_dude, young_guy);
}

fn old_person_verifies_age() {
    let old_pete = OldPerson::new("Pete", 40, 130.24);
    let pete = Person::new("Pete", 40, 130.24);

    assert_not_equal!(old_pete, pete);
    assert_greater_than!(old_pete, pete);
}

fn young_person_verifies_age() {
    let young_pete = YoungPerson::new("Pete", 40, 130.24);
    let pete = Person::new("Pete", 40, 130.24);

    assert_not_equal!(young_pete, pete);
    assert_less_than!(young_pete, pete);
}

fn copies_compare_equal() {
    let old_pete = OldPerson::new("Pete", 83, 130.243);
    let pete = Person::from(&old_pete);

    assert_equal!(old_pete, pete);
    assert_equal!(pete, old_pete);

    let young_pete = YoungPerson::new("Pete", 13, 99.3);
    let pete2 = Person::from(&young_pete);

    assert_equal!(young_pete, pete2);
    assert_equal!(pete2, young_pete);
}

fn live_value_is_not_null() {
    let young_pete = Rc::new(YoungPerson::new("Pete", 200, 300.0));
    let handle = Some(Rc::clone(&young_pete));

    assert_not_null!(handle); // passes
    assert_null!(handle); // fails
}

fn younger_is_not_greater() {
    let old_pete = OldPerson::new("Pete", 83, 130.243);
    let young_pete = YoungPerson::new("Pete", 13, 94.5);

    assert_less_than!(young_pete, old_pete); // passes
    assert_greater_than!(young_pete, old_pete); // fails
}

register_tests!(
    young_is_less_than_old,
    old_person_verifies_age,
    young_person_verifies_age,
    copies_compare_equal,
    live_value_is_not_null,
    younger_is_not_greater,
);
