// GraphQL documents sent by `QuestsClient`.

pub(crate) const QUESTS_QUERY: &str = r"
query QuestlineQuests($lang: LanguageCode, $gameMode: GameMode) {
    achievements(lang: $lang, gameMode: $gameMode) {
        id
        name
        description
        hidden
        side
        rarity
        playerPercentage
        imageLink
    }
    prestige(lang: $lang, gameMode: $gameMode) {
        id
        name
        prestigeLevel
        imageLink
        conditions {
            id
            description
        }
    }
    tasks(lang: $lang, gameMode: $gameMode) {
        id
        name
        normalizedName
        trader { id name normalizedName }
        map { id name normalizedName }
        experience
        wikiLink
        minPlayerLevel
        factionName
        kappaRequired
        lightkeeperRequired
        taskRequirements {
            task { id name }
            status
        }
        traderRequirements {
            requirementType
            trader { id name normalizedName }
            value
            compareMethod
        }
        objectives {
            id
            type
            description
            optional
            maps { id name normalizedName }
        }
    }
}
";

pub(crate) const TRADERS_QUERY: &str = r"
query QuestlineTraders($lang: LanguageCode, $gameMode: GameMode) {
    traders(lang: $lang, gameMode: $gameMode) {
        id
        name
        normalizedName
        imageLink
    }
}
";
