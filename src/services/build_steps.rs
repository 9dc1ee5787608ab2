//! Ordered construction steps per project type.

use crate::domain::{BuildStep, ProjectType};

const fn step(step: u32, title: &'static str, description: &'static str) -> BuildStep {
    BuildStep {
        step,
        title,
        description,
    }
}

const OUTDOOR_KITCHEN: &[BuildStep] = &[
    step(1, "Markera och gräv", "Markera ut området med snöre och pinnar. Gräv bort grässvålen och lägg singel/makadam för dränering."),
    step(2, "Sätt plintar", "Placera betongplintarna i ett rutnät (ca 60-80cm mellan). Använd vattenpass för att få allt i nivå."),
    step(3, "Bygg golvram", "Montera golvreglar på plintarna. Fäst med vinkelbeslag. Kontrollera att allt är i vinkel med snickarvinkeln."),
    step(4, "Res stolpar och stomme", "Skruva fast stolparna i golvramens hörn. Montera horisontella reglar för bänkstöd och eventuell överhylla."),
    step(5, "Montera bänkskiva", "Lägg bänkskivan på stommen. Markera och skär ut hål för diskho och ev. grillinbyggnad."),
    step(6, "Installera diskho och grill", "Fäst diskho underifrån med clips. Placera grillen i sin öppning. Anslut vatten och gas/el vid behov."),
    step(7, "Klä in och ytbehandla", "Klä in stommen med panel eller låt reglar synas. Behandla trä med olja eller lasyr för att skydda mot väder."),
];

const DECK: &[BuildStep] = &[
    step(1, "Markera och gräv", "Markera ytans hörn med pinnar och snöre. Gräv bort grässvål och jämna till marken."),
    step(2, "Sätt plintar", "Placera plintar i rätt position. Max 60cm mellan plintar på längden, max 120cm på tvären."),
    step(3, "Montera bärläkt", "Lägg upp bärläkt (golvbalkar) på plintarna. Använd pallklossar för nivåjustering. Fäst med vinkelbeslag."),
    step(4, "Lägg trall", "Börja vid husväggen. Lägg trallbrädor med 5-8mm mellanrum. Förborra och skruva 2 skruvar per bärläkt."),
    step(5, "Montera kantlist", "Skruva fast kantlist runt altanen för att dölja ändträet."),
    step(6, "Ytbehandla", "Behandla obehandlad trall med terrassolja. Tryckimpregnerat kan lämnas obehandlat."),
];

const SHED: &[BuildStep] = &[
    step(1, "Förbered grunden", "Markera yta, gräv bort grässvål, lägg ut markduk och singel för dränering."),
    step(2, "Sätt plintar eller platta", "Placera plintar i hörn och mitt. Alternativt gjut en enkel platta."),
    step(3, "Bygg golvram", "Montera syll på plintarna med förankring. Lägg in golvbjälkar."),
    step(4, "Res väggstomme", "Förbered väggsektioner liggande och res dem en i taget. Börja med bakvägg."),
    step(5, "Montera takstolar", "Placera takstolarna med rätt c/c-avstånd. Skruva fast i hammarband."),
    step(6, "Lägg tak", "Montera råspont eller takplywood. Lägg takpapp och täck med plåt eller shingel."),
    step(7, "Klä väggar", "Montera vindskydd och panel. Sätt foder runt dörr och fönster."),
    step(8, "Måla och slutför", "Grundmåla och täckmåla utvändigt. Montera dörrbeslag, hängrännor etc."),
];

const PERGOLA: &[BuildStep] = &[
    step(1, "Markera stolppositioner", "Markera ut de 4 stolppositionerna. Kontrollera att det är exakt i vinkel med 3-4-5-metoden."),
    step(2, "Förbered stolpfästen", "Gjut ner stolpskor eller markskruvar. Låt härda minst 24 timmar innan belastning."),
    step(3, "Montera stolpar", "Fäst stolparna i stolpskorna. Använd vattenpass och temporärt stöd tills hammarbandet sitter."),
    step(4, "Montera hammarband", "Skruva fast hammarbanden (de övre bärande reglarna) i stolparna med vinkeljärn eller genombultning."),
    step(5, "Lägg takreglar", "Montera takreglar på hammarbanden med jämnt avstånd (ca 50-60cm). Skruva snett eller använd vinkelbeslag."),
    step(6, "Ytbehandla", "Olja eller lasera träet för att skydda mot väder. Upprepa vartannat år."),
];

const FENCE: &[BuildStep] = &[
    step(1, "Markera stolppositioner", "Slå ner pinnar var 2 meter längs staketlinjen. Kontrollera med snöre att linjen är rak."),
    step(2, "Gräv stolphål", "Gräv hål ca 50cm djupa (under tjäldjup). Bred ut botten för stabilitet."),
    step(3, "Sätt stolpar", "Placera stolpar i hålen med lite singel i botten. Justera med vattenpass och fyll med jord/betong."),
    step(4, "Montera reglar", "Skruva fast horisontella reglar mellan stolparna - en ca 20cm från mark, en ca 20cm från topp."),
    step(5, "Sätt brädor", "Skruva fast staketbrädorna på reglarna. Använd distansklots för jämnt avstånd."),
    step(6, "Ytbehandla", "Måla eller lasera staketet. Tryckimpregnerat kan lämnas obehandlat men åldras grått."),
];

const CARPORT: &[BuildStep] = &[
    step(1, "Markera och förbered grund", "Markera yta på minst 3x6m. Lägg ut markduk och singel, eller gjut plattor för stolpfästen."),
    step(2, "Förankra stolpar", "Borra ner markskruvar eller gjut ner stolpskor i hörnen och vid behov mittstolpar."),
    step(3, "Res stolpar", "Montera stolpar (minst 95x95mm) i stolpskorna. Kontrollera lod och stötta temporärt."),
    step(4, "Montera hammarband", "Fäst hammarband (45x195 eller limträbalk) på stolparna. Kontrollera att taket får rätt fall."),
    step(5, "Lägg takbalkar", "Montera takbalkar vinkelrätt mot hammarbandet med ca 60cm c/c."),
    step(6, "Lägg takskiva och täckmaterial", "Montera råspont eller plywood. Täck med takpapp och plåt eller takshingel."),
    step(7, "Slutför", "Montera vindskivor och hängrännor. Ytbehandla synligt trä."),
];

const PLANTER_BOX: &[BuildStep] = &[
    step(1, "Förbered material", "Köp tryckimpregnerade brädor (28x120mm) och reglar. Mät och såga till rätt längder."),
    step(2, "Bygg ramen", "Skruva ihop sidorna till en rektangulär ram. Använd vinkelbeslag i hörnen för stabilitet."),
    step(3, "Montera botten", "Lägg brädor i botten med mellanrum för dränering. Borra hål om du vill ha bättre vattenavrinning."),
    step(4, "Fäst markduk", "Klä insidan med markduk för att hålla jorden på plats men släppa igenom vatten."),
    step(5, "Fyll med jord", "Fyll med planteringsjord blandad med kompost. Lämna 5cm kant för vattning."),
];

const PLAYHOUSE: &[BuildStep] = &[
    step(1, "Förbered grunden", "Placera betongplattor eller plintar på plan yta. Kontrollera med vattenpass."),
    step(2, "Bygg golvram", "Montera golvreglar på grunden. Lägg golvskiva eller brädor."),
    step(3, "Res väggarna", "Förbered väggarna liggande och res dem en i taget. Spika ihop i hörnen."),
    step(4, "Montera tak", "Lägg takbalkar och täck med plywood och takpapp eller shingel."),
    step(5, "Sätt dörr och fönster", "Montera dörr och eventuella fönster. Lägg foder runt öppningarna."),
    step(6, "Måla", "Grundmåla och täckmåla i valfria färger. Barnsäker färg rekommenderas."),
];

const GREENHOUSE: &[BuildStep] = &[
    step(1, "Förbered plats", "Välj soligt läge. Jämna till marken och lägg eventuellt markplattor som golv."),
    step(2, "Montera ram", "Följ tillverkarens instruktioner för att montera aluminiumramen eller träkonstruktionen."),
    step(3, "Sätt glasskivor/plast", "Montera väggpaneler och tak av glas, polykarbonat eller plastfolie."),
    step(4, "Installera ventilation", "Montera takfönster eller ventilationsluckor för luftcirkulation."),
    step(5, "Inredning", "Sätt upp hyllor, bänkar och eventuellt bevattningssystem."),
];

/// Returns the build steps for a project type.
///
/// `Other` has no steps. Unrecognised keys get the outdoor kitchen steps,
/// which is also what the web client shows as its default project.
pub fn steps_for(project_type: &ProjectType) -> &'static [BuildStep] {
    match project_type {
        ProjectType::OutdoorKitchen | ProjectType::Unknown(_) => OUTDOOR_KITCHEN,
        ProjectType::Deck => DECK,
        ProjectType::Shed => SHED,
        ProjectType::Pergola => PERGOLA,
        ProjectType::Fence => FENCE,
        ProjectType::Carport => CARPORT,
        ProjectType::PlanterBox => PLANTER_BOX,
        ProjectType::Playhouse => PLAYHOUSE,
        ProjectType::Greenhouse => GREENHOUSE,
        ProjectType::Other => &[],
    }
}
