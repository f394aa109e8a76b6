//! Built-in catalog served when the store holds no pets

use super::model::{Gender, Pet, PetSize};

#[allow(clippy::too_many_arguments)]
fn pet(
    id: u64,
    name: &str,
    kind: &str,
    breed: &str,
    age: &str,
    size: PetSize,
    gender: Gender,
    description: &str,
) -> Pet {
    Pet {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        breed: breed.to_string(),
        age: age.to_string(),
        size,
        gender,
        description: description.to_string(),
        image: format!("images/{}.jpg", name.to_lowercase()),
        adopted: false,
    }
}

/// The default catalog, every pet available
#[rustfmt::skip]
pub fn seed_pets() -> Vec<Pet> {
    use Gender::*;
    use PetSize::*;

    vec![
        pet(1, "Buddy", "Dog", "Golden Retriever", "2 years", Large, Male,
            "Friendly and energetic dog who loves to play fetch."),
        pet(2, "Luna", "Cat", "Persian", "1 year", Small, Female,
            "Calm and affectionate cat, perfect for families."),
        pet(3, "Max", "Dog", "Labrador", "3 years", Large, Male,
            "Loyal and intelligent companion."),
        pet(4, "Bella", "Dog", "Beagle", "6 months", Medium, Female,
            "Curious puppy with a great nose and a bigger heart."),
        pet(5, "Oliver", "Cat", "Maine Coon", "4 years", Large, Male,
            "Gentle giant who enjoys long naps in the sun."),
        pet(6, "Coco", "Rabbit", "Holland Lop", "8 months", Small, Female,
            "Soft, quiet and happy to be held."),
        pet(7, "Charlie", "Dog", "German Shepherd", "5 years", Large, Male,
            "Protective and well trained, great with older children."),
        pet(8, "Kiwi", "Parrot", "Budgerigar", "2 years", Small, Male,
            "Chatty little bird who learns new words quickly."),
        pet(9, "Daisy", "Dog", "Poodle", "7 years", Medium, Female,
            "Calm senior lady looking for a quiet home."),
        pet(10, "Simba", "Cat", "Bengal", "3 years", Medium, Male,
            "Playful climber who needs plenty of toys."),
        pet(11, "Peanut", "Guinea Pig", "Abyssinian", "1 year", Small, Male,
            "Social and vocal, loves fresh vegetables."),
        pet(12, "Rocky", "Dog", "Boxer", "4 years", Large, Male,
            "Energetic and affectionate, needs daily runs."),
        pet(13, "Milo", "Cat", "Siamese", "9 years", Small, Male,
            "Talkative senior who follows you from room to room."),
        pet(14, "Hazel", "Rabbit", "Lionhead", "3 months", Small, Female,
            "Tiny bundle of fluff, still a little shy."),
    ]
}
