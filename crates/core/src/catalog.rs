//! Static prompt catalog for the studio's canned actions.

/// Application title shown in the window chrome and CLI output.
pub const APP_TITLE: &str = "AI Photo Studio";

/// Instruction used by the "Remove Background" action.
pub const REMOVE_BACKGROUND_PROMPT: &str =
    "Remove background and replace with solid white studio background";

/// A wardrobe entry the user can apply to the loaded photo.
///
/// The catalog is static and read-only; `prompt` is the instruction
/// forwarded verbatim to the edit adapter.
#[derive(Clone, Copy, Debug)]
pub struct ClothingOption {
    pub id: &'static str,
    pub name: &'static str,
    pub thumbnail: &'static str,
    pub prompt: &'static str,
}

/// The wardrobe catalog shown in the clothing picker.
pub const CLOTHING_OPTIONS: &[ClothingOption] = &[
    ClothingOption {
        id: "black-suit",
        name: "Black Suit",
        thumbnail: "https://picsum.photos/seed/black-suit/200",
        prompt: "Replace the person's clothing with a tailored black formal business suit, white shirt and dark tie",
    },
    ClothingOption {
        id: "navy-suit",
        name: "Navy Suit",
        thumbnail: "https://picsum.photos/seed/navy-suit/200",
        prompt: "Replace the person's clothing with a navy blue two-piece suit and a light blue shirt",
    },
    ClothingOption {
        id: "grey-blazer",
        name: "Grey Blazer",
        thumbnail: "https://picsum.photos/seed/grey-blazer/200",
        prompt: "Replace the person's clothing with a light grey blazer over a white dress shirt, no tie",
    },
    ClothingOption {
        id: "white-shirt",
        name: "White Shirt",
        thumbnail: "https://picsum.photos/seed/white-shirt/200",
        prompt: "Replace the person's clothing with a crisp white formal dress shirt",
    },
    ClothingOption {
        id: "tuxedo",
        name: "Tuxedo",
        thumbnail: "https://picsum.photos/seed/tuxedo/200",
        prompt: "Replace the person's clothing with a classic black tuxedo with bow tie",
    },
    ClothingOption {
        id: "pinstripe",
        name: "Pinstripe",
        thumbnail: "https://picsum.photos/seed/pinstripe/200",
        prompt: "Replace the person's clothing with a charcoal pinstripe suit and burgundy tie",
    },
    ClothingOption {
        id: "saree",
        name: "Saree",
        thumbnail: "https://picsum.photos/seed/saree/200",
        prompt: "Replace the person's clothing with an elegant traditional silk saree",
    },
    ClothingOption {
        id: "panjabi",
        name: "Panjabi",
        thumbnail: "https://picsum.photos/seed/panjabi/200",
        prompt: "Replace the person's clothing with a traditional white panjabi",
    },
    ClothingOption {
        id: "doctor-coat",
        name: "Doctor Coat",
        thumbnail: "https://picsum.photos/seed/doctor-coat/200",
        prompt: "Replace the person's clothing with a white doctor's lab coat over formal attire",
    },
    ClothingOption {
        id: "police-uniform",
        name: "Police Uniform",
        thumbnail: "https://picsum.photos/seed/police-uniform/200",
        prompt: "Replace the person's clothing with a formal police dress uniform",
    },
    ClothingOption {
        id: "graduation-gown",
        name: "Graduation Gown",
        thumbnail: "https://picsum.photos/seed/graduation-gown/200",
        prompt: "Replace the person's clothing with a black graduation gown and cap",
    },
    ClothingOption {
        id: "denim-jacket",
        name: "Denim Jacket",
        thumbnail: "https://picsum.photos/seed/denim-jacket/200",
        prompt: "Replace the person's clothing with a casual blue denim jacket over a plain t-shirt",
    },
];
