// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A numeric asset type as understood by the world server.
///
/// Only the codes listed in the type table are valid. Everything else,
/// including names that do not resolve, collapses to [`AssetTypeCode::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetTypeCode(i32);

/// Code and canonical name of every type the wire protocol can transfer.
const TYPE_TABLE: &[(i32, &str)] = &[
    (0, "Texture"),
    (1, "SoundVorbis"),
    (17, "SoundWav"),
    (19, "Image"),
    (43, "Mesh"),
    (44, "Skeleton"),
    (45, "MaterialScript"),
    (46, "GenericAvatarXml"),
    (47, "ParticleScript"),
    (49, "FlashAnimation"),
];

impl AssetTypeCode {
    /// The distinguished "unrecognized type" code.
    pub const INVALID: AssetTypeCode = AssetTypeCode(-1);
    /// Textures travel over the dedicated image channel.
    pub const TEXTURE: AssetTypeCode = AssetTypeCode(0);
    /// Ogg Vorbis sound.
    pub const SOUND_VORBIS: AssetTypeCode = AssetTypeCode(1);
    /// Uncompressed wave sound.
    pub const SOUND_WAV: AssetTypeCode = AssetTypeCode(17);
    /// Non-texture image data.
    pub const IMAGE: AssetTypeCode = AssetTypeCode(19);
    /// Binary mesh.
    pub const MESH: AssetTypeCode = AssetTypeCode(43);
    /// Skeleton used by skinned meshes.
    pub const SKELETON: AssetTypeCode = AssetTypeCode(44);
    /// Material definition script.
    pub const MATERIAL_SCRIPT: AssetTypeCode = AssetTypeCode(45);
    /// Avatar appearance description.
    pub const GENERIC_AVATAR_XML: AssetTypeCode = AssetTypeCode(46);
    /// Particle system script.
    pub const PARTICLE_SCRIPT: AssetTypeCode = AssetTypeCode(47);
    /// Flash animation.
    pub const FLASH_ANIMATION: AssetTypeCode = AssetTypeCode(49);

    /// Resolves a type name to its code, or [`AssetTypeCode::INVALID`] for
    /// names outside the table. Matching is exact.
    pub fn from_type_name(name: &str) -> Self {
        TYPE_TABLE
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| AssetTypeCode(*code))
            .unwrap_or(Self::INVALID)
    }

    /// Returns the canonical name, or `None` for a code outside the table.
    pub fn type_name(self) -> Option<&'static str> {
        TYPE_TABLE
            .iter()
            .find(|(code, _)| *code == self.0)
            .map(|(_, name)| *name)
    }

    /// The raw wire value.
    pub fn code(self) -> i32 {
        self.0
    }

    /// Returns `true` if the code is part of the type table.
    pub fn is_valid(self) -> bool {
        self.type_name().is_some()
    }

    /// Textures use the image channel; everything else uses generic transfers.
    pub fn is_texture(self) -> bool {
        self == Self::TEXTURE
    }
}

impl fmt::Display for AssetTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.type_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "<invalid type {}>", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_a_bijection() {
        for (code, name) in TYPE_TABLE {
            let resolved = AssetTypeCode::from_type_name(name);
            assert_eq!(resolved.code(), *code);
            assert_eq!(resolved.type_name(), Some(*name));
        }

        let mut codes: Vec<i32> = TYPE_TABLE.iter().map(|(c, _)| *c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), TYPE_TABLE.len());
    }

    #[test]
    fn unknown_names_are_invalid() {
        assert_eq!(AssetTypeCode::from_type_name("Shader"), AssetTypeCode::INVALID);
        assert_eq!(AssetTypeCode::from_type_name("texture"), AssetTypeCode::INVALID);
        assert_eq!(AssetTypeCode::from_type_name(""), AssetTypeCode::INVALID);
        assert!(!AssetTypeCode::INVALID.is_valid());
        assert_eq!(AssetTypeCode::INVALID.type_name(), None);
    }

    #[test]
    fn only_texture_is_texture() {
        assert!(AssetTypeCode::TEXTURE.is_texture());
        assert!(!AssetTypeCode::IMAGE.is_texture());
        assert_eq!(AssetTypeCode::TEXTURE.to_string(), "Texture");
    }
}
