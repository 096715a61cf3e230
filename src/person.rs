//! Person value types used to exercise the harness.

use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;
use core::ops::Deref;

/// A named person. Equality looks at every field, ordering only at age.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    name: String,
    age: u16,
    weight: f32,
}

impl Person {
    pub fn new(name: impl Into<String>, age: u16, weight: f32) -> Self {
        Self {
            name: name.into(),
            age,
            weight,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn age(&self) -> u16 {
        self.age
    }

    pub fn set_age(&mut self, age: u16) {
        self.age = age;
    }

    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.weight = weight;
    }
}

// Ages decide the order; people of the same age are only comparable when equal.
fn compare(lhs: &Person, rhs: &Person) -> Option<Ordering> {
    match lhs.age.cmp(&rhs.age) {
        Ordering::Equal if lhs == rhs => Some(Ordering::Equal),
        Ordering::Equal => None,
        order => Some(order),
    }
}

impl PartialOrd for Person {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        compare(self, other)
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.age, self.weight)
    }
}

/// Inclusive age range a [`BoundedPerson`] is kept within.
pub trait AgeBand {
    const MIN: u16;
    const MAX: u16;
}

#[derive(Debug, Clone, Copy)]
pub struct Old;

impl AgeBand for Old {
    const MIN: u16 = 65;
    const MAX: u16 = 150;
}

#[derive(Debug, Clone, Copy)]
pub struct Young;

impl AgeBand for Young {
    const MIN: u16 = 0;
    const MAX: u16 = 30;
}

/// A person whose age is clamped into `B`'s band on every change.
#[derive(Debug, Clone)]
pub struct BoundedPerson<B> {
    person: Person,
    band: PhantomData<B>,
}

pub type OldPerson = BoundedPerson<Old>;
pub type YoungPerson = BoundedPerson<Young>;

impl<B: AgeBand> BoundedPerson<B> {
    pub fn new(name: impl Into<String>, age: u16, weight: f32) -> Self {
        let mut bounded = Self {
            person: Person::new(name, age, weight),
            band: PhantomData,
        };
        bounded.verify();
        bounded
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.person.set_name(name);
        self.verify();
    }

    pub fn set_age(&mut self, age: u16) {
        self.person.set_age(age);
        self.verify();
    }

    pub fn set_weight(&mut self, weight: f32) {
        self.person.set_weight(weight);
        self.verify();
    }

    fn verify(&mut self) {
        let age = self.person.age.clamp(B::MIN, B::MAX);
        self.person.age = age;
    }
}

impl<B> Deref for BoundedPerson<B> {
    type Target = Person;

    fn deref(&self) -> &Person {
        &self.person
    }
}

impl<B> From<BoundedPerson<B>> for Person {
    fn from(bounded: BoundedPerson<B>) -> Self {
        bounded.person
    }
}

impl<B> From<&BoundedPerson<B>> for Person {
    fn from(bounded: &BoundedPerson<B>) -> Self {
        bounded.person.clone()
    }
}

impl<B> fmt::Display for BoundedPerson<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.person.fmt(f)
    }
}

impl<B, C> PartialEq<BoundedPerson<C>> for BoundedPerson<B> {
    fn eq(&self, other: &BoundedPerson<C>) -> bool {
        self.person == other.person
    }
}

impl<B> PartialEq<Person> for BoundedPerson<B> {
    fn eq(&self, other: &Person) -> bool {
        self.person == *other
    }
}

impl<B> PartialEq<BoundedPerson<B>> for Person {
    fn eq(&self, other: &BoundedPerson<B>) -> bool {
        *self == other.person
    }
}

impl<B, C> PartialOrd<BoundedPerson<C>> for BoundedPerson<B> {
    fn partial_cmp(&self, other: &BoundedPerson<C>) -> Option<Ordering> {
        compare(&self.person, &other.person)
    }
}

impl<B> PartialOrd<Person> for BoundedPerson<B> {
    fn partial_cmp(&self, other: &Person) -> Option<Ordering> {
        compare(&self.person, other)
    }
}

impl<B> PartialOrd<BoundedPerson<B>> for Person {
    fn partial_cmp(&self, other: &BoundedPerson<B>) -> Option<Ordering> {
        compare(self, &other.person)
    }
}
