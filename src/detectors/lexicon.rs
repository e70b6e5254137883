//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Veri.
//! The Veri project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Term lists shared by the keyword detectors and the local inference
//! fallbacks. All terms are lowercase and matched case-insensitively on word
//! boundaries.

use crate::result::VeriEmotionType;

pub const LEFT_TERMS: &[&str] = &[
    "progressive",
    "progressives",
    "social justice",
    "climate crisis",
    "climate emergency",
    "climate justice",
    "systemic racism",
    "structural racism",
    "income inequality",
    "wealth gap",
    "living wage",
    "universal healthcare",
    "medicare for all",
    "reproductive rights",
    "reproductive freedom",
    "abortion rights",
    "pro-choice",
    "gun control",
    "gun violence",
    "gun safety",
    "undocumented immigrants",
    "asylum seekers",
    "dreamers",
    "lgbtq",
    "marriage equality",
    "trans rights",
    "gender-affirming care",
    "workers' rights",
    "labor movement",
    "union workers",
    "corporate greed",
    "billionaire class",
    "tax the rich",
    "fair share",
    "green new deal",
    "renewable energy",
    "clean energy",
    "racial justice",
    "police brutality",
    "defund the police",
    "white privilege",
    "white supremacy",
    "diversity",
    "equity",
    "inclusion",
    "marginalized",
    "oppressed",
    "voter suppression",
    "affordable housing",
    "public option",
    "social safety net",
    "fossil fuel industry",
    "big oil",
    "far-right",
    "maga extremists",
    "environmental justice",
    "democratic socialism",
    "antiracist",
    "book bans",
    "minimum wage increase",
    "student debt relief",
];

pub const RIGHT_TERMS: &[&str] = &[
    "conservative",
    "conservatives",
    "traditional values",
    "family values",
    "illegal aliens",
    "illegal immigrants",
    "illegal immigration",
    "border security",
    "secure the border",
    "border crisis",
    "open borders",
    "amnesty",
    "law and order",
    "pro-life",
    "unborn",
    "sanctity of life",
    "second amendment",
    "gun rights",
    "religious liberty",
    "religious freedom",
    "free market",
    "free enterprise",
    "small government",
    "limited government",
    "big government",
    "tax relief",
    "job creators",
    "deregulation",
    "woke",
    "wokeness",
    "radical left",
    "far-left",
    "socialist",
    "socialism",
    "cancel culture",
    "mainstream media",
    "fake news",
    "patriot",
    "patriots",
    "america first",
    "deep state",
    "globalist",
    "globalists",
    "coastal elites",
    "welfare state",
    "handouts",
    "entitlement programs",
    "energy independence",
    "election integrity",
    "voter fraud",
    "parental rights",
    "critical race theory",
    "gender ideology",
    "tax and spend",
    "liberal elites",
    "national sovereignty",
    "thin blue line",
    "crime wave",
    "activist judges",
    "indoctrination",
    "government overreach",
];

pub const DOOMSCROLL_TERMS: &[&str] = &[
    "pandemic",
    "catastrophe",
    "catastrophic",
    "collapse",
    "crisis",
    "disaster",
    "looms",
    "apocalypse",
    "apocalyptic",
    "doom",
    "devastating",
    "devastation",
    "death toll",
    "extinction",
    "meltdown",
    "recession",
    "emergency",
    "panic",
    "feared",
    "fears",
    "threat",
    "chaos",
    "deadly",
    "outbreak",
    "famine",
    "wildfire",
    "worst ever",
    "no escape",
    "end of the world",
    "grim",
    "spiraling",
];

pub const OUTRAGE_TERMS: &[&str] = &[
    "outrageous",
    "outrage",
    "disgraceful",
    "shocking",
    "unbelievable",
    "you won't believe",
    "slams",
    "destroys",
    "blasts",
    "furious",
    "scandal",
    "betrayal",
    "disgusting",
    "insane",
    "ridiculous",
    "shameful",
    "how dare",
    "traitor",
    "traitors",
    "corrupt",
    "war on",
    "they don't want you to know",
    "wake up",
    "enemy of the people",
    "evil",
    "liar",
    "rigged",
    "hypocrite",
    "hypocrisy",
    "pathetic",
    "sickening",
];

pub const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "positive",
    "success",
    "successful",
    "improve",
    "improved",
    "improvement",
    "benefit",
    "beneficial",
    "growth",
    "gain",
    "gains",
    "win",
    "wins",
    "hope",
    "hopeful",
    "progress",
    "strong",
    "celebrate",
    "praised",
    "breakthrough",
    "recovery",
    "safe",
    "happy",
    "optimistic",
    "support",
    "achievement",
    "thriving",
];

pub const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "awful",
    "negative",
    "failure",
    "failed",
    "decline",
    "declined",
    "loss",
    "losses",
    "crisis",
    "disaster",
    "threat",
    "danger",
    "dangerous",
    "fear",
    "worse",
    "worst",
    "weak",
    "collapse",
    "criticized",
    "scandal",
    "corrupt",
    "death",
    "deadly",
    "angry",
    "sad",
    "problem",
    "risk",
    "violence",
];

pub const EMOTION_TERMS: &[(VeriEmotionType, &[&str])] = &[
    (
        VeriEmotionType::Joy,
        &["happy", "joy", "delighted", "celebrate", "celebration", "wonderful", "love", "thrilled", "cheerful", "triumph"],
    ),
    (
        VeriEmotionType::Sadness,
        &["sad", "grief", "mourning", "tragic", "tragedy", "heartbreaking", "loss", "lonely", "sorrow", "despair"],
    ),
    (
        VeriEmotionType::Anger,
        &["angry", "furious", "outrage", "rage", "fury", "livid", "resent", "infuriating", "slams", "hostile"],
    ),
    (
        VeriEmotionType::Fear,
        &["fear", "afraid", "scared", "terrified", "panic", "threat", "danger", "alarming", "dread", "anxious"],
    ),
    (
        VeriEmotionType::Surprise,
        &["surprise", "surprising", "shocking", "unexpected", "stunning", "astonishing", "sudden", "unbelievable", "amazed", "startling"],
    ),
    (
        VeriEmotionType::Disgust,
        &["disgusting", "disgust", "revolting", "vile", "sickening", "gross", "repulsive", "nauseating", "filthy", "appalling"],
    ),
];
