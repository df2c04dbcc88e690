//! The hand-authored trip: four days in Fukuoka, 1/11 to 1/14.

use crate::models::itinerary::{Category, ClockTime, DayPlan, ItineraryItem, TransportMode};

struct Seed(ItineraryItem);

impl Seed {
    fn new(id: &str, name: &str, category: Category, start: (u32, u32), end: (u32, u32)) -> Self {
        Seed(ItineraryItem::new(
            id,
            name,
            category,
            ClockTime::hm(start.0, start.1),
            ClockTime::hm(end.0, end.1),
        ))
    }

    fn mode(mut self, mode: TransportMode) -> Self {
        self.0.transport_mode = Some(mode);
        self
    }

    fn detail(mut self, detail: &str) -> Self {
        self.0.transport_detail = Some(detail.to_string());
        self
    }

    fn hours(mut self, hours: &str) -> Self {
        self.0.opening_hours = Some(hours.to_string());
        self
    }

    fn booking(mut self, link: &str) -> Self {
        self.0.booking_link = Some(link.to_string());
        self
    }

    fn notes(mut self, notes: &str) -> Self {
        self.0.notes = Some(notes.to_string());
        self
    }

    fn at(mut self, lat: f64, lng: f64) -> ItineraryItem {
        self.0.lat = Some(lat);
        self.0.lng = Some(lng);
        self.0
    }
}

fn day(date: &str, weekday: &str, itinerary: Vec<ItineraryItem>) -> DayPlan {
    DayPlan {
        date: date.to_string(),
        weekday: weekday.to_string(),
        itinerary,
    }
}

pub fn initial_days() -> Vec<DayPlan> {
    use Category::*;
    use TransportMode::*;

    vec![
        day(
            "1/11",
            "SUN",
            vec![
                Seed::new("1", "CI110 台北-福岡", Flight, (6, 50), (10, 0))
                    .mode(Plane)
                    .notes("T2 航廈，提早2小時。")
                    .at(33.5859, 130.4462),
                Seed::new("hotel-d1", "The Breakfast Hotel", Lodging, (11, 0), (11, 30))
                    .mode(Car)
                    .detail("計程車: 國際航廈1F直達天神 (約20分鐘，¥2500)。")
                    .hours("24小時營業")
                    .booking("https://www.agoda.com/")
                    .notes("先寄放行李，卡特&阿圓推薦這間飯店。")
                    .at(33.5901, 130.4044),
                Seed::new("3", "Shin-Shin 拉麵 天神本店", Food, (11, 45), (12, 45))
                    .mode(Walk)
                    .detail("步行約 8 分鐘。")
                    .hours("11:00–03:00 (無公休)")
                    .booking("https://www.hakata-shinshin.com/")
                    .notes("博多必吃，卡特阿圓強力推薦。")
                    .at(33.5932, 130.3977),
                Seed::new("4", "櫛田神社 & 川端通", Sight, (13, 30), (15, 30))
                    .mode(Train)
                    .detail("地鐵空港線: 天神站 -> 櫛田神社前站 (1站)。")
                    .hours("04:00–22:00 (神社服務)")
                    .notes("博多總鎮守，感受傳統文化。")
                    .at(33.5930, 130.4105),
                Seed::new("6", "博多運河城 (Canal City)", Shopping, (16, 0), (18, 30))
                    .mode(Walk)
                    .detail("就在神社旁邊，步行 3 分鐘。")
                    .hours("10:00–21:00")
                    .notes("博多區最大的商場，噴水秀每半小時一次。")
                    .at(33.5898, 130.4107),
                Seed::new("7", "博多牛腸鍋 Ooyama", Food, (19, 0), (21, 0))
                    .mode(Walk)
                    .detail("步行至博多車站 (約 10 分鐘)。")
                    .hours("11:00–23:00 (無休)")
                    .booking("https://www.motu-ooyama.com/reservation/")
                    .notes("已預約。就在博多車站旁 KITTE 大樓。")
                    .at(33.5892, 130.4211),
            ],
        ),
        day(
            "1/12",
            "MON",
            vec![
                Seed::new("hotel-d2", "The Breakfast Hotel (出發)", Lodging, (8, 0), (8, 45))
                    .hours("早餐 07:00 開始")
                    .notes("吃完豐盛早餐後出發。")
                    .at(33.5901, 130.4044),
                Seed::new("9", "西鐵天神站", Transit, (8, 50), (9, 15))
                    .mode(Walk)
                    .hours("05:00–24:00")
                    .notes("購買柳川太宰府觀光套票。")
                    .at(33.5898, 130.3995),
                Seed::new("10", "柳川遊船", Sight, (10, 15), (11, 30))
                    .mode(Train)
                    .detail("西鐵特急: 西鐵福岡(天神) -> 西鐵柳川 (約50分)。")
                    .hours("09:00–17:00 (無休)")
                    .notes("水都柳川悠閒遊船體驗。")
                    .at(33.2657, 130.4077),
                Seed::new("11", "若松屋 (Wakamatsuya)", Food, (11, 45), (13, 0))
                    .mode(Walk)
                    .hours("11:00–19:30 (週三休)")
                    .notes("必吃蒸鰻魚飯，今日週一正常營業。")
                    .at(33.2616, 130.4014),
                Seed::new("12", "太宰府天滿宮", Sight, (14, 30), (16, 0))
                    .mode(Train)
                    .hours("06:30–19:00 (全年無休)")
                    .notes("表參道散策、星巴克旗艦店、梅枝餅。")
                    .at(33.5215, 130.5349),
                Seed::new("yatai-d2", "中洲屋台街", Food, (19, 0), (21, 0))
                    .mode(Train)
                    .hours("18:00–00:00")
                    .notes("感受福岡最道地的夜晚氛圍。")
                    .at(33.5906, 130.4085),
            ],
        ),
        day(
            "1/13",
            "TUE",
            vec![
                Seed::new("mina", "Mina 天神 (卡特買爆區)", Shopping, (10, 0), (12, 30))
                    .mode(Walk)
                    .hours("10:00–20:00")
                    .notes("卡特形容的「買爆區」！品牌：九州最大 Uniqlo/GU、大型 Loft (有 Olive Young 專區)、3COINS 質感雜貨。")
                    .at(33.5939, 130.3989),
                Seed::new("mentaiju", "元祖博多明太重", Food, (12, 45), (14, 0))
                    .mode(Walk)
                    .hours("07:00–22:30")
                    .notes("福岡必吃網紅名店，建議提前預約。")
                    .at(33.5910, 130.4045),
                Seed::new("parco-complex", "天神首戰: PARCO & Solaria", Shopping, (14, 15), (16, 0))
                    .mode(Walk)
                    .hours("10:00–20:30")
                    .notes("【PARCO】年輕女生服飾聖地：Snidel, Gelato Pique, @cosme, 伊都きんぐ草莓甜點(B2)。【SOLARIA】質感選物：卡特大推 Beauty & Youth, FREAK'S STORE。")
                    .at(33.5915, 130.3989),
                Seed::new("daimyo", "大名區 (福岡裏原宿)", Shopping, (16, 15), (17, 45))
                    .mode(Walk)
                    .hours("11:00–20:00")
                    .notes("福岡的「裏原宿」，巷弄潮流聖地。品牌：Supreme, Stussy, 各式古著屋 (Vintage Shops), 水曜日的愛麗絲。")
                    .at(33.5878, 130.3954),
                Seed::new("bic-underground", "Bic Camera 2號館 & 地下街", Shopping, (18, 0), (18, 45))
                    .hours("10:00–21:00")
                    .notes("【Bic Camera】卡特在這裡買了相機，買 3C 電器首選。【天神地下街】歐風石板路氣氛極佳，必吃 Ringo 蘋果派。")
                    .at(33.5888, 130.3995),
                Seed::new("13", "葫蘆壽司 (Hyotan Sushi)", Food, (19, 0), (21, 0))
                    .mode(Walk)
                    .hours("11:30–14:30, 17:00–21:00")
                    .notes("天神排隊壽司名店。")
                    .at(33.5901, 130.3991),
            ],
        ),
        day(
            "1/14",
            "WED",
            vec![
                Seed::new("stock", "Pain Stock (stock)", Food, (8, 20), (9, 0))
                    .mode(Walk)
                    .hours("08:00–19:00")
                    .notes("今日週三有營業！天神中央公園旁，著名的明太子法國麵包。")
                    .at(33.5915, 130.4042),
                Seed::new("daco", "Dacomecca 麵包店", Food, (9, 30), (10, 30))
                    .mode(Train)
                    .hours("08:00–20:00")
                    .notes("博多站旁，森林系裝潢，明太子法棍極推。")
                    .at(33.5898, 130.4192),
                Seed::new("pancake-d4", "PANCAKE HOUSE 博多丸井店", Food, (11, 0), (12, 30))
                    .mode(Walk)
                    .hours("10:00–21:00")
                    .notes("2F 必點荷蘭寶貝鬆餅。")
                    .at(33.5891, 130.4208),
                Seed::new("hakata-final", "博多車站最後衝刺", Shopping, (14, 30), (17, 0))
                    .hours("10:00–20:00")
                    .notes("【博多阪急 B1】伴手禮補貨：Tubu Tube (明太子軟管/牙膏)、努努雞(冷炸雞)、博多通饅頭。【AMU EST】年輕商場：Hello Kitty 福岡限定磁鐵、各式卡通周邊。")
                    .at(33.5897, 130.4208),
                Seed::new("croissant", "Il Forno del Mignon", Food, (17, 15), (17, 45))
                    .hours("07:00–23:00")
                    .notes("車站內排隊迷你可頌，口感酥脆，適合帶回台或在機場享用。")
                    .at(33.5895, 130.4205),
                Seed::new("airport", "福岡機場 (FUK)", Flight, (18, 15), (21, 0))
                    .hours("05:00–22:00")
                    .notes("提早2小時報到。")
                    .at(33.5859, 130.4462),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_has_four_sorted_days() {
        let days = initial_days();
        assert_eq!(days.len(), 4);
        for day in &days {
            assert!(!day.itinerary.is_empty());
            assert!(day
                .itinerary
                .windows(2)
                .all(|w| w[0].start_time <= w[1].start_time));
        }
    }

    #[test]
    fn test_first_day_starts_with_flight() {
        let days = initial_days();
        let first = &days[0].itinerary[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.start_time.to_string(), "06:50");
        assert_eq!(first.category, Category::Flight);
        assert_eq!(days[0].date, "1/11");
        assert_eq!(days[3].weekday, "WED");
    }

    #[test]
    fn test_seed_ids_are_unique() {
        let days = initial_days();
        let mut ids: Vec<&str> = days
            .iter()
            .flat_map(|d| d.itinerary.iter().map(|i| i.id.as_str()))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }
}
